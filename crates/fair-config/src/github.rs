//! GitHub API configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default GitHub REST API base URL.
fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// Default bot login used for issue-command attribution.
fn default_bot_name() -> String {
    "codefair-bot".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// GitHub REST API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Installed-app access token used for repository API calls.
    #[serde(default)]
    pub token: String,

    /// Bot login whose issue-body commands are honored.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: String::new(),
            bot_name: default_bot_name(),
        }
    }
}

impl GithubConfig {
    /// Whether the section carries enough to make authenticated calls.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    /// Fail early when the section cannot make authenticated calls.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when no token is set.
    pub fn ensure_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "github".to_string(),
            })
        }
    }
}
