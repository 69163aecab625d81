//! Zenodo token store.
//!
//! One token per GitHub username. Tokens are stored as-is; encrypting at
//! rest is the deployment's concern (filesystem permissions on the db file).

use fair_core::entities::StoredToken;

use crate::FairDb;
use crate::error::DatabaseError;

impl FairDb {
    /// Fetch the stored Zenodo token for a user, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_token(&self, username: &str) -> Result<Option<StoredToken>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT username, token FROM zenodo_tokens WHERE username = ?1",
                [username],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(StoredToken {
                username: row.get::<String>(0)?,
                token: row.get::<String>(1)?,
            })),
            None => Ok(None),
        }
    }

    /// Store or replace a user's Zenodo token.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn put_token(&self, token: &StoredToken) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO zenodo_tokens (username, token) VALUES (?1, ?2)
                 ON CONFLICT(username) DO UPDATE SET token = excluded.token",
                libsql::params![token.username.as_str(), token.token.as_str()],
            )
            .await?;
        Ok(())
    }

    /// Remove a user's stored token. Removing a missing token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn delete_token(&self, username: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute("DELETE FROM zenodo_tokens WHERE username = ?1", [username])
            .await?;
        Ok(())
    }
}
