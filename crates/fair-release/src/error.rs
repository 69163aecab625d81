//! Pipeline error types.
//!
//! Every step of the publish pipeline converges into [`ReleaseError`] so the
//! orchestrator's single error boundary can persist the failed status and
//! log one full chain.

use thiserror::Error;

/// Errors from the archival pipeline.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Zenodo API or transport failure.
    #[error("Zenodo: {0}")]
    Zenodo(#[from] fair_zenodo::ZenodoError),

    /// GitHub API or transport failure.
    #[error("GitHub: {0}")]
    Github(#[from] fair_github::GithubError),

    /// State persistence failure.
    #[error("database: {0}")]
    Database(#[from] fair_db::error::DatabaseError),

    /// The publish trigger comment could not be parsed.
    #[error("invalid publish command: {0}")]
    CommandParse(String),

    /// Input validation failure (metadata files, license, tokens).
    #[error("validation: {0}")]
    Validation(String),

    /// The stored license URL does not resolve to a known SPDX id.
    #[error("license URL '{url}' does not resolve to a known SPDX identifier")]
    UnknownLicense { url: String },

    /// The repository carries a custom (non-SPDX) license.
    #[error("custom licenses cannot be archived; an SPDX license is required")]
    CustomLicense,

    /// An asset failed to transfer; names the asset for the audit trail.
    #[error("failed to transfer asset '{asset}': {source}")]
    AssetTransfer {
        asset: String,
        #[source]
        source: Box<ReleaseError>,
    },

    /// A publish run is already in flight for this repository.
    #[error("a publish run is already in progress for repository {repository_id}")]
    AlreadyInProgress { repository_id: i64 },
}
