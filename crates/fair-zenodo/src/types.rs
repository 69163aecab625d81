//! Zenodo API response types.
//!
//! Only the fields the pipeline reads are modeled; everything else in the
//! (large) deposition payload is ignored. These values live for the
//! duration of one orchestration run.

use serde::Deserialize;

/// A deposition as returned by the deposit API.
#[derive(Debug, Clone, Deserialize)]
pub struct ZenodoDepositionInfo {
    pub id: i64,
    /// Id of the record backing the current draft. Differs from `id` after
    /// a new-version action; absent on some legacy responses.
    #[serde(default)]
    pub record_id: Option<i64>,
    /// Concept record id tying all versions together.
    #[serde(default)]
    pub conceptrecid: Option<String>,
    /// False while the deposition is an unsubmitted draft.
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub files: Vec<DepositionFile>,
    #[serde(default)]
    pub links: DepositionLinks,
    #[serde(default)]
    pub metadata: DepositionMetadata,
}

impl ZenodoDepositionInfo {
    /// The id uploads and metadata updates must target: `record_id` when
    /// present (it tracks the current draft after versioning), else `id`.
    #[must_use]
    pub fn effective_record_id(&self) -> i64 {
        self.record_id.unwrap_or(self.id)
    }

    /// The DOI reserved for this draft, if Zenodo prereserved one.
    #[must_use]
    pub fn prereserved_doi(&self) -> Option<&str> {
        self.metadata
            .prereserve_doi
            .as_ref()
            .map(|p| p.doi.as_str())
    }
}

/// One file already attached to a deposition draft.
#[derive(Debug, Clone, Deserialize)]
pub struct DepositionFile {
    #[serde(default)]
    pub id: Option<String>,
    pub filename: String,
}

/// Links block of a deposition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepositionLinks {
    /// Object-storage endpoint for file uploads.
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub latest_html: Option<String>,
}

/// Metadata block of a deposition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepositionMetadata {
    #[serde(default)]
    pub prereserve_doi: Option<PrereserveDoi>,
    #[serde(default)]
    pub upload_type: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub access_right: Option<String>,
}

/// Prereserved DOI block.
#[derive(Debug, Clone, Deserialize)]
pub struct PrereserveDoi {
    pub doi: String,
    #[serde(default)]
    pub recid: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "id": 1003150,
        "record_id": 1003151,
        "conceptrecid": "1003149",
        "submitted": false,
        "files": [
            {"id": "abc-123", "filename": "tool-v1.0.0.zip"},
            {"id": "def-456", "filename": "data.csv"}
        ],
        "links": {
            "bucket": "https://zenodo.org/api/files/xyz",
            "latest_html": "https://zenodo.org/record/1003150"
        },
        "metadata": {
            "prereserve_doi": {"doi": "10.5281/zenodo.1003151", "recid": 1003151},
            "version": "1.0.0",
            "access_right": "open"
        }
    }"#;

    #[test]
    fn parse_deposition_fixture() {
        let info: ZenodoDepositionInfo = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(info.id, 1_003_150);
        assert_eq!(info.effective_record_id(), 1_003_151);
        assert!(!info.submitted);
        assert_eq!(info.files.len(), 2);
        assert_eq!(info.files[0].filename, "tool-v1.0.0.zip");
        assert_eq!(
            info.links.bucket.as_deref(),
            Some("https://zenodo.org/api/files/xyz")
        );
        assert_eq!(info.prereserved_doi(), Some("10.5281/zenodo.1003151"));
        assert!(info.metadata.upload_type.is_none());
    }

    #[test]
    fn minimal_deposition_defaults() {
        let info: ZenodoDepositionInfo = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(info.effective_record_id(), 7);
        assert!(info.files.is_empty());
        assert!(info.links.bucket.is_none());
        assert!(info.prereserved_doi().is_none());
    }
}
