//! # fair-db
//!
//! libSQL persistence for Fairkit archival state.
//!
//! Holds the three tables the pipeline reads and writes: one deposition
//! record per repository, the stored license details, and the per-user
//! Zenodo token store.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) — native, embeddable,
//! stable API.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Fairkit state operations.
pub struct FairDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl FairDb {
    /// Open a local-only database at the given path.
    ///
    /// Runs migrations automatically on first open. `":memory:"` is
    /// accepted for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let fair_db = Self { db, conn };
        fair_db.run_migrations().await?;
        Ok(fair_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
