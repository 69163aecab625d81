//! Zenodo endpoint configuration.

use serde::{Deserialize, Serialize};

/// Default Zenodo web endpoint (record pages, badges).
fn default_endpoint() -> String {
    "https://zenodo.org".to_string()
}

/// Default Zenodo REST API endpoint.
fn default_api_endpoint() -> String {
    "https://zenodo.org/api".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZenodoConfig {
    /// Web endpoint, used to build record URLs shown to users.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// REST API endpoint. Point at `https://sandbox.zenodo.org/api` for
    /// sandbox testing.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
}

impl Default for ZenodoConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_endpoint: default_api_endpoint(),
        }
    }
}

impl ZenodoConfig {
    /// URL of a published record page for the given record id.
    #[must_use]
    pub fn record_url(&self, record_id: i64) -> String {
        format!("{}/records/{record_id}", self.endpoint)
    }
}
