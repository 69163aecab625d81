//! Application-level configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Dashboard domain used when rendering links back to the app,
    /// e.g. `https://fairkit.example.org`.
    #[serde(default)]
    pub domain: String,
}

impl AppConfig {
    /// Dashboard release URL for a repository.
    #[must_use]
    pub fn release_dashboard_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/dashboard/{owner}/{repo}/release/zenodo", self.domain)
    }
}
