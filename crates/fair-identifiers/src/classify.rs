//! Candidate string to classified identifier.

use lazy_regex::{Lazy, Regex, lazy_regex};

use crate::{ClassifiedIdentifier, IdentifierKind, IdentifierSource};

/// DOI pattern: prefix `10.` + 4-9 registrant digits (optional sub-division)
/// + suffix of DOI-legal characters.
static DOI_REGEX: Lazy<Regex> = lazy_regex!(r"10\.\d{4,9}(?:\.\d+)?/[-A-Za-z0-9:/_.;()\[\]\\]+");

/// DOI resolver URL: `https://doi.org/...` or `https://dx.doi.org/...`.
static DOI_URL_REGEX: Lazy<Regex> = lazy_regex!(r"(?i)^https?://(?:dx\.)?doi\.org/(.+)$");

/// Literal prefix that marks a DOI as minted by Zenodo.
const ZENODO_DOI_PREFIX: &str = "10.5281/zenodo.";

/// Classify one candidate string from a metadata file.
///
/// Normalization order:
/// 1. A `doi.org`/`dx.doi.org` URL has its path extracted and re-matched
///    against the DOI pattern.
/// 2. Otherwise the DOI pattern is matched directly inside the raw string.
/// 3. Otherwise the whole trimmed string is kept as a non-DOI identifier.
#[must_use]
pub fn classify_candidate(candidate: &str, source: IdentifierSource) -> ClassifiedIdentifier {
    let trimmed = candidate.trim();

    let (value, is_doi) = if let Some(captures) = DOI_URL_REGEX.captures(trimmed) {
        let path = captures[1].trim().to_string();
        match DOI_REGEX.find(&path) {
            Some(found) => (found.as_str().to_string(), true),
            // Resolver URL without a recognizable DOI in its path.
            None => (path, false),
        }
    } else if let Some(found) = DOI_REGEX.find(trimmed) {
        (found.as_str().to_string(), true)
    } else {
        (trimmed.to_string(), false)
    };

    let (kind, zenodo_id) = if !is_doi {
        (IdentifierKind::NonDoi, None)
    } else if let Some(suffix) = value.strip_prefix(ZENODO_DOI_PREFIX) {
        (IdentifierKind::ZenodoDoi, Some(suffix.to_string()))
    } else {
        (IdentifierKind::OtherDoi, None)
    };

    ClassifiedIdentifier {
        kind,
        display_value: value.clone(),
        value,
        zenodo_id,
        source,
    }
}

/// Extract the bare DOI from an identifier string, if one is present.
///
/// Used when rewriting `CITATION.cff`, whose `doi` field takes the bare DOI
/// rather than a resolver URL.
#[must_use]
pub fn bare_doi(identifier: &str) -> Option<String> {
    let classified = classify_candidate(identifier, IdentifierSource::Codemeta);
    match classified.kind {
        IdentifierKind::ZenodoDoi | IdentifierKind::OtherDoi => Some(classified.value),
        IdentifierKind::NonDoi => None,
    }
}
