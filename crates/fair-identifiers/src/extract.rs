//! Candidate extraction from metadata file content.

use crate::classify::classify_candidate;
use crate::{ClassifiedIdentifier, IdentifierSource};

/// Candidate identifier strings from raw `codemeta.json` content.
///
/// The `identifier` field may be a string, an object carrying an `@id`,
/// `id`, or `value` key, or an array of either. The file content itself may
/// be a JSON object or a JSON string wrapping one (some producers
/// double-encode). Malformed JSON is logged as a warning and yields no
/// candidates — never an error.
#[must_use]
pub fn codemeta_candidates(content: &str) -> Vec<String> {
    let parsed: serde_json::Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "malformed codemeta.json, skipping identifier extraction");
            return Vec::new();
        }
    };

    // Double-encoded file: the whole document is a JSON string.
    let object = match &parsed {
        serde_json::Value::String(inner) => match serde_json::from_str(inner) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(%error, "codemeta.json string payload is not valid JSON");
                return Vec::new();
            }
        },
        _ => parsed,
    };

    let Some(identifier) = object.get("identifier") else {
        return Vec::new();
    };

    match identifier {
        serde_json::Value::Array(entries) => {
            entries.iter().filter_map(candidate_from_value).collect()
        }
        other => candidate_from_value(other).into_iter().collect(),
    }
}

/// Normalize one `identifier` entry to a candidate string.
fn candidate_from_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Object(map) => ["@id", "id", "value"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(String::from),
        _ => None,
    }
}

/// Candidate identifier strings from raw `CITATION.cff` content.
///
/// Only the top-level `doi` scalar is read. Malformed YAML is logged as a
/// warning and yields no candidates.
#[must_use]
pub fn citation_candidates(content: &str) -> Vec<String> {
    let parsed: serde_yaml::Value = match serde_yaml::from_str(content) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, "malformed CITATION.cff, skipping identifier extraction");
            return Vec::new();
        }
    };

    parsed
        .get("doi")
        .and_then(serde_yaml::Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
        .into_iter()
        .collect()
}

/// Extract and classify all identifiers from the given metadata files.
///
/// Candidates keep first-seen order per source (codemeta first, citation
/// second) and are deduplicated by exact `value` equality — semantic DOI
/// equivalence (case, resolver-URL vs bare form surviving normalization) is
/// a known limitation.
#[must_use]
pub fn classify_identifiers(
    codemeta: Option<&str>,
    citation: Option<&str>,
) -> Vec<ClassifiedIdentifier> {
    let mut result: Vec<ClassifiedIdentifier> = Vec::new();

    let sources = [
        (codemeta, IdentifierSource::Codemeta),
        (citation, IdentifierSource::Citation),
    ];

    for (content, source) in sources {
        let Some(content) = content else { continue };
        let candidates = match source {
            IdentifierSource::Codemeta => codemeta_candidates(content),
            IdentifierSource::Citation => citation_candidates(content),
        };
        for candidate in candidates {
            let classified = classify_candidate(&candidate, source);
            if !result.iter().any(|seen| seen.value == classified.value) {
                result.push(classified);
            }
        }
    }

    result
}
