//! Persisted entity structs for Fairkit.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DepositionStatus;

/// The single archival record kept per repository.
///
/// Exactly one live record exists per `repository_id`; a fresh publish
/// command updates the existing row rather than inserting a second one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DepositionRecord {
    pub repository_id: i64,
    /// Numeric Zenodo record id of the last resolved deposition, if any.
    pub zenodo_id: Option<i64>,
    /// Whether this record was version-chained from a prior submitted deposition.
    pub existing_deposition: bool,
    pub last_published_doi: Option<String>,
    pub status: DepositionStatus,
    pub github_release_id: Option<i64>,
    pub github_tag_name: Option<String>,
    /// Mirror of the last metadata payload sent to Zenodo. Opaque JSON.
    pub zenodo_metadata: serde_json::Value,
    pub submitting_user: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored license details for a repository.
///
/// Consumed read-only by metadata synthesis. A `license_id` of `"Custom"`
/// is a hard rejection for archival.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LicenseRecord {
    pub repository_id: i64,
    /// SPDX identifier, or the sentinel `"Custom"`.
    pub license_id: String,
    pub license_content: String,
}

impl LicenseRecord {
    /// Sentinel license id for non-SPDX license text.
    pub const CUSTOM: &'static str = "Custom";

    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.license_id == Self::CUSTOM
    }

    /// SPDX details URL for this license, e.g.
    /// `https://spdx.org/licenses/MIT`.
    #[must_use]
    pub fn spdx_url(&self) -> String {
        format!("https://spdx.org/licenses/{}", self.license_id)
    }
}

/// A stored Zenodo API token for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredToken {
    pub username: String,
    pub token: String,
}
