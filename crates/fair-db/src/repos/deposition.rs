//! Deposition record repository — one row per repository.

use chrono::Utc;

use fair_core::entities::DepositionRecord;
use fair_core::enums::DepositionStatus;

use crate::FairDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_json};

fn row_to_record(row: &libsql::Row) -> Result<DepositionRecord, DatabaseError> {
    Ok(DepositionRecord {
        repository_id: row.get::<i64>(0)?,
        zenodo_id: row.get::<Option<i64>>(1)?,
        existing_deposition: row.get::<i64>(2)? != 0,
        last_published_doi: get_opt_string(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        github_release_id: row.get::<Option<i64>>(5)?,
        github_tag_name: get_opt_string(row, 6)?,
        zenodo_metadata: parse_json(&row.get::<String>(7)?)?,
        submitting_user: get_opt_string(row, 8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

const SELECT_COLUMNS: &str = "repository_id, zenodo_id, existing_deposition, last_published_doi, \
     status, github_release_id, github_tag_name, zenodo_metadata, submitting_user, \
     created_at, updated_at";

impl FairDb {
    /// Fetch the deposition record for a repository, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or row parsing fails.
    pub async fn get_deposition(
        &self,
        repository_id: i64,
    ) -> Result<Option<DepositionRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLUMNS} FROM deposition_records WHERE repository_id = ?1"),
                [repository_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert or replace the deposition record for its repository.
    ///
    /// `updated_at` is stamped here; `created_at` of an existing row is
    /// preserved by the upsert.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn upsert_deposition(
        &self,
        record: &DepositionRecord,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let metadata = serde_json::to_string(&record.zenodo_metadata)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        self.conn()
            .execute(
                "INSERT INTO deposition_records
                 (repository_id, zenodo_id, existing_deposition, last_published_doi, status,
                  github_release_id, github_tag_name, zenodo_metadata, submitting_user,
                  created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT(repository_id) DO UPDATE SET
                   zenodo_id = excluded.zenodo_id,
                   existing_deposition = excluded.existing_deposition,
                   last_published_doi = excluded.last_published_doi,
                   status = excluded.status,
                   github_release_id = excluded.github_release_id,
                   github_tag_name = excluded.github_tag_name,
                   zenodo_metadata = excluded.zenodo_metadata,
                   submitting_user = excluded.submitting_user,
                   updated_at = excluded.updated_at",
                libsql::params![
                    record.repository_id,
                    record.zenodo_id,
                    i64::from(record.existing_deposition),
                    record.last_published_doi.as_deref(),
                    record.status.as_str(),
                    record.github_release_id,
                    record.github_tag_name.as_deref(),
                    metadata.as_str(),
                    record.submitting_user.as_deref(),
                    record.created_at.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        Ok(())
    }

    /// Move a deposition record to `new_status`, enforcing the status
    /// machine. The record must already exist.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` if no record exists for the repository;
    /// `DatabaseError::InvalidTransition` if the transition is not allowed.
    pub async fn set_deposition_status(
        &self,
        repository_id: i64,
        new_status: DepositionStatus,
    ) -> Result<DepositionRecord, DatabaseError> {
        let current = self
            .get_deposition(repository_id)
            .await?
            .ok_or(DatabaseError::NoResult)?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidTransition {
                repository_id,
                from: current.status,
                to: new_status,
            });
        }

        let now = Utc::now();
        self.conn()
            .execute(
                "UPDATE deposition_records SET status = ?1, updated_at = ?2 WHERE repository_id = ?3",
                libsql::params![new_status.as_str(), now.to_rfc3339(), repository_id],
            )
            .await?;
        tracing::debug!(
            repository_id,
            from = current.status.as_str(),
            to = new_status.as_str(),
            "deposition status transition"
        );

        self.get_deposition(repository_id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Record a completed publication: the minted DOI, the published
    /// status, and the carried metadata mirror, in one statement.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn mark_published(
        &self,
        repository_id: i64,
        doi: &str,
        metadata: &serde_json::Value,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now();
        let metadata = serde_json::to_string(metadata)
            .map_err(|e| DatabaseError::Other(e.into()))?;
        self.conn()
            .execute(
                "UPDATE deposition_records
                 SET status = ?1, last_published_doi = ?2, zenodo_metadata = ?3, updated_at = ?4
                 WHERE repository_id = ?5",
                libsql::params![
                    DepositionStatus::Published.as_str(),
                    doi,
                    metadata.as_str(),
                    now.to_rfc3339(),
                    repository_id
                ],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(repository_id: i64) -> DepositionRecord {
        DepositionRecord {
            repository_id,
            zenodo_id: Some(1_003_150),
            existing_deposition: false,
            last_published_doi: None,
            status: DepositionStatus::Draft,
            github_release_id: Some(9),
            github_tag_name: Some("v1.0.0".to_string()),
            zenodo_metadata: serde_json::json!({}),
            submitting_user: Some("alice".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn test_db() -> FairDb {
        FairDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrip() {
        let db = test_db().await;
        let rec = record(42);
        db.upsert_deposition(&rec).await.unwrap();

        let fetched = db.get_deposition(42).await.unwrap().unwrap();
        assert_eq!(fetched.repository_id, 42);
        assert_eq!(fetched.zenodo_id, Some(1_003_150));
        assert_eq!(fetched.status, DepositionStatus::Draft);
        assert_eq!(fetched.github_tag_name.as_deref(), Some("v1.0.0"));
    }

    #[tokio::test]
    async fn upsert_replaces_existing_row() {
        let db = test_db().await;
        db.upsert_deposition(&record(42)).await.unwrap();

        let mut updated = record(42);
        updated.zenodo_id = Some(2_000_000);
        updated.existing_deposition = true;
        db.upsert_deposition(&updated).await.unwrap();

        let fetched = db.get_deposition(42).await.unwrap().unwrap();
        assert_eq!(fetched.zenodo_id, Some(2_000_000));
        assert!(fetched.existing_deposition);

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM deposition_records", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.get_deposition(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn status_machine_is_enforced() {
        let db = test_db().await;
        db.upsert_deposition(&record(42)).await.unwrap();

        // draft -> published skips in_progress
        let err = db
            .set_deposition_status(42, DepositionStatus::Published)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::InvalidTransition {
                repository_id: 42,
                from: DepositionStatus::Draft,
                to: DepositionStatus::Published,
            }
        ));

        let rec = db
            .set_deposition_status(42, DepositionStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(rec.status, DepositionStatus::InProgress);

        let rec = db
            .set_deposition_status(42, DepositionStatus::Published)
            .await
            .unwrap();
        assert_eq!(rec.status, DepositionStatus::Published);
    }

    #[tokio::test]
    async fn error_status_allows_retry() {
        let db = test_db().await;
        let mut rec = record(42);
        rec.status = DepositionStatus::Error;
        db.upsert_deposition(&rec).await.unwrap();

        let rec = db
            .set_deposition_status(42, DepositionStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(rec.status, DepositionStatus::InProgress);
    }

    #[tokio::test]
    async fn mark_published_stamps_doi_and_metadata() {
        let db = test_db().await;
        let mut rec = record(42);
        rec.status = DepositionStatus::InProgress;
        db.upsert_deposition(&rec).await.unwrap();

        let metadata = serde_json::json!({"metadata": {"version": "1.0.0"}});
        db.mark_published(42, "10.5281/zenodo.1003150", &metadata)
            .await
            .unwrap();

        let fetched = db.get_deposition(42).await.unwrap().unwrap();
        assert_eq!(fetched.status, DepositionStatus::Published);
        assert_eq!(
            fetched.last_published_doi.as_deref(),
            Some("10.5281/zenodo.1003150")
        );
        assert_eq!(fetched.zenodo_metadata, metadata);
    }
}
