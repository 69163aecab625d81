//! Deposition metadata synthesis.
//!
//! Builds the `{"metadata": {...}}` payload Zenodo expects from the
//! repository's codemeta.json, the stored license record, and the payload
//! persisted by the previous publish run (which wins for `access_right`
//! and `version`).

use chrono::NaiveDate;
use serde_json::{Map, Value, json};

use fair_core::entities::LicenseRecord;
use fair_core::spdx;

use crate::error::ReleaseError;

/// Inputs to metadata synthesis.
pub struct SynthesisInput<'a> {
    /// Parsed codemeta.json of the repository.
    pub codemeta: &'a Value,
    /// Stored license record, if the repository has one.
    pub license: Option<&'a LicenseRecord>,
    /// The `metadata` object persisted from the previous publish, if any.
    pub stored_metadata: Option<&'a Value>,
    /// Whether to set `upload_type: "software"` in the payload.
    pub add_upload_type: bool,
    /// Publication date (date-only, UTC).
    pub today: NaiveDate,
}

/// Build the deposition metadata payload.
///
/// # Errors
///
/// - [`ReleaseError::CustomLicense`] when the license resolves to the
///   `Custom` sentinel.
/// - [`ReleaseError::UnknownLicense`] when the license URL does not map to
///   a known SPDX id.
/// - [`ReleaseError::Validation`] when no license source is available at all.
pub fn synthesize(input: &SynthesisInput<'_>) -> Result<Value, ReleaseError> {
    let mut metadata = Map::new();

    if let Some(title) = input.codemeta.get("name").and_then(Value::as_str) {
        metadata.insert("title".to_string(), json!(title));
    }
    if let Some(description) = input.codemeta.get("description").and_then(Value::as_str) {
        metadata.insert("description".to_string(), json!(description));
    }
    if let Some(keywords) = input.codemeta.get("keywords").and_then(Value::as_array) {
        metadata.insert("keywords".to_string(), json!(keywords));
    }

    metadata.insert("creators".to_string(), json!(creators(input.codemeta)));
    metadata.insert("license".to_string(), json!(resolve_license(input)?));
    metadata.insert(
        "publication_date".to_string(),
        json!(input.today.format("%Y-%m-%d").to_string()),
    );

    // The previously persisted payload wins over codemeta for these two.
    for field in ["access_right", "version"] {
        let preferred = input
            .stored_metadata
            .and_then(|m| m.get(field))
            .or_else(|| input.codemeta.get(field));
        if let Some(value) = preferred.and_then(Value::as_str) {
            metadata.insert(field.to_string(), json!(value));
        }
    }

    if input.add_upload_type {
        metadata.insert("upload_type".to_string(), json!("software"));
    }

    Ok(json!({ "metadata": Value::Object(metadata) }))
}

/// Extract Zenodo creators from codemeta `author` entries.
///
/// Entries with `type == "Role"` are organizational markers, not people,
/// and are skipped. Names render as `"Family, Given"`, falling back to the
/// given name alone.
fn creators(codemeta: &Value) -> Vec<Value> {
    let Some(authors) = codemeta.get("author").and_then(Value::as_array) else {
        return Vec::new();
    };

    authors
        .iter()
        .filter(|author| {
            author
                .get("type")
                .and_then(Value::as_str)
                .is_none_or(|t| t != "Role")
        })
        .filter_map(|author| {
            let given = author.get("givenName").and_then(Value::as_str);
            let family = author.get("familyName").and_then(Value::as_str);
            let name = match (family, given) {
                (Some(family), Some(given)) => format!("{family}, {given}"),
                (Some(family), None) => family.to_string(),
                (None, Some(given)) => given.to_string(),
                (None, None) => return None,
            };

            let mut creator = Map::new();
            creator.insert("name".to_string(), json!(name));
            if let Some(affiliation) = author
                .get("affiliation")
                .and_then(|a| a.get("name"))
                .and_then(Value::as_str)
            {
                creator.insert("affiliation".to_string(), json!(affiliation));
            }
            if let Some(orcid) = author
                .get("orcid")
                .or_else(|| author.get("@id"))
                .and_then(Value::as_str)
            {
                creator.insert("orcid".to_string(), json!(orcid));
            }
            Some(Value::Object(creator))
        })
        .collect()
}

/// Resolve the deposition license id from codemeta or the stored record.
fn resolve_license(input: &SynthesisInput<'_>) -> Result<String, ReleaseError> {
    let url = input
        .codemeta
        .get("license")
        .and_then(Value::as_str)
        .map(String::from)
        .or_else(|| input.license.map(LicenseRecord::spdx_url))
        .ok_or_else(|| {
            ReleaseError::Validation("no license found in codemeta.json or stored record".to_string())
        })?;

    let license_id = spdx::license_id_from_url(&url)
        .ok_or_else(|| ReleaseError::UnknownLicense { url: url.clone() })?;
    if license_id == LicenseRecord::CUSTOM {
        return Err(ReleaseError::CustomLicense);
    }
    Ok(license_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codemeta() -> Value {
        json!({
            "name": "fairtool",
            "description": "A tool for FAIR software.",
            "keywords": ["fair", "metadata"],
            "license": "https://spdx.org/licenses/MIT",
            "version": "2.0.0",
            "author": [
                {
                    "givenName": "Ada",
                    "familyName": "Lovelace",
                    "affiliation": {"name": "Analytical Engines"},
                    "orcid": "https://orcid.org/0000-0001-2345-6789"
                },
                {"type": "Role", "roleName": "Maintainer"},
                {"givenName": "Grace"}
            ]
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn synthesizes_full_payload() {
        let input = SynthesisInput {
            codemeta: &codemeta(),
            license: None,
            stored_metadata: None,
            add_upload_type: true,
            today: today(),
        };
        let payload = synthesize(&input).unwrap();
        let metadata = &payload["metadata"];

        assert_eq!(metadata["title"], "fairtool");
        assert_eq!(metadata["license"], "MIT");
        assert_eq!(metadata["publication_date"], "2026-08-29");
        assert_eq!(metadata["upload_type"], "software");
        assert_eq!(metadata["version"], "2.0.0");

        let creators = metadata["creators"].as_array().unwrap();
        assert_eq!(creators.len(), 2);
        assert_eq!(creators[0]["name"], "Lovelace, Ada");
        assert_eq!(creators[0]["affiliation"], "Analytical Engines");
        assert_eq!(creators[1]["name"], "Grace");
    }

    #[test]
    fn role_entries_are_excluded() {
        let input = SynthesisInput {
            codemeta: &codemeta(),
            license: None,
            stored_metadata: None,
            add_upload_type: false,
            today: today(),
        };
        let payload = synthesize(&input).unwrap();
        let names: Vec<&str> = payload["metadata"]["creators"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert!(!names.iter().any(|n| n.contains("Maintainer")));
    }

    #[test]
    fn stored_metadata_wins_for_version_and_access_right() {
        let stored = json!({"version": "1.9.9", "access_right": "open"});
        let input = SynthesisInput {
            codemeta: &codemeta(),
            license: None,
            stored_metadata: Some(&stored),
            add_upload_type: false,
            today: today(),
        };
        let payload = synthesize(&input).unwrap();
        assert_eq!(payload["metadata"]["version"], "1.9.9");
        assert_eq!(payload["metadata"]["access_right"], "open");
        assert!(payload["metadata"].get("upload_type").is_none());
    }

    #[test]
    fn license_falls_back_to_stored_record() {
        let mut meta = codemeta();
        meta.as_object_mut().unwrap().remove("license");
        let license = LicenseRecord {
            repository_id: 1,
            license_id: "Apache-2.0".to_string(),
            license_content: String::new(),
        };
        let input = SynthesisInput {
            codemeta: &meta,
            license: Some(&license),
            stored_metadata: None,
            add_upload_type: false,
            today: today(),
        };
        let payload = synthesize(&input).unwrap();
        assert_eq!(payload["metadata"]["license"], "Apache-2.0");
    }

    #[test]
    fn unknown_license_url_is_fatal() {
        let mut meta = codemeta();
        meta["license"] = json!("https://example.com/my-own-terms");
        let input = SynthesisInput {
            codemeta: &meta,
            license: None,
            stored_metadata: None,
            add_upload_type: false,
            today: today(),
        };
        assert!(matches!(
            synthesize(&input),
            Err(ReleaseError::UnknownLicense { url }) if url.contains("example.com")
        ));
    }

    #[test]
    fn custom_license_is_rejected() {
        let mut meta = codemeta();
        meta["license"] = json!("https://spdx.org/licenses/Custom");
        let input = SynthesisInput {
            codemeta: &meta,
            license: None,
            stored_metadata: None,
            add_upload_type: false,
            today: today(),
        };
        assert!(matches!(synthesize(&input), Err(ReleaseError::CustomLicense)));
    }

    #[test]
    fn missing_license_everywhere_is_validation_error() {
        let mut meta = codemeta();
        meta.as_object_mut().unwrap().remove("license");
        let input = SynthesisInput {
            codemeta: &meta,
            license: None,
            stored_metadata: None,
            add_upload_type: false,
            today: today(),
        };
        assert!(matches!(synthesize(&input), Err(ReleaseError::Validation(_))));
    }
}
