//! Database configuration.

use serde::{Deserialize, Serialize};

/// Default local database path.
fn default_path() -> String {
    "fairkit.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DbConfig {
    /// Path to the local libSQL database file. `:memory:` is accepted for
    /// tests.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
