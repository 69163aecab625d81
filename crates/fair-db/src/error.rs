//! Database error types for fair-db.

use fair_core::enums::DepositionStatus;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A deposition status transition not allowed by the state machine.
    #[error(
        "deposition for repository {repository_id} cannot move from '{}' to '{}'",
        from.as_str(),
        to.as_str()
    )]
    InvalidTransition {
        repository_id: i64,
        from: DepositionStatus,
        to: DepositionStatus,
    },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
