//! # fair-config
//!
//! Layered configuration loading for Fairkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FAIRKIT_*` prefix, `__` as separator)
//! 2. Project-level `.fairkit/config.toml`
//! 3. User-level `~/.config/fairkit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FAIRKIT_ZENODO__API_ENDPOINT` -> `zenodo.api_endpoint`,
//! `FAIRKIT_GITHUB__TOKEN` -> `github.token`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! Every external endpoint the pipeline talks to is carried in this struct
//! and passed into client constructors; no component reads the process
//! environment on its own.

mod app;
mod db;
mod error;
mod github;
mod zenodo;

pub use app::AppConfig;
pub use db::DbConfig;
pub use error::ConfigError;
pub use github::GithubConfig;
pub use zenodo::ZenodoConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FairConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub zenodo: ZenodoConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub db: DbConfig,
}

impl FairConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`FairConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI and
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".fairkit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("FAIRKIT_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("fairkit").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is
    /// found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = FairConfig::default();
        assert!(!config.github.is_configured());
        assert_eq!(config.zenodo.endpoint, "https://zenodo.org");
        assert!(config.app.domain.is_empty());
        assert_eq!(config.db.path, "fairkit.db");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let config: FairConfig = FairConfig::figment().extract()?;
            assert_eq!(config.zenodo.api_endpoint, "https://zenodo.org/api");
            assert_eq!(config.github.bot_name, "codefair-bot");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("FAIRKIT_ZENODO__API_ENDPOINT", "https://sandbox.zenodo.org/api");
            jail.set_env("FAIRKIT_GITHUB__TOKEN", "ghs_test");
            let config: FairConfig = FairConfig::figment().extract()?;
            assert_eq!(config.zenodo.api_endpoint, "https://sandbox.zenodo.org/api");
            assert!(config.github.is_configured());
            Ok(())
        });
    }
}
