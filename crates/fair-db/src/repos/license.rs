//! License record repository.
//!
//! Read mostly: metadata synthesis consumes the stored license for a
//! repository; the upsert exists for ingest tooling and tests.

use fair_core::entities::LicenseRecord;

use crate::FairDb;
use crate::error::DatabaseError;

impl FairDb {
    /// Fetch the stored license for a repository, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_license(
        &self,
        repository_id: i64,
    ) -> Result<Option<LicenseRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT repository_id, license_id, license_content
                 FROM license_records WHERE repository_id = ?1",
                [repository_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(LicenseRecord {
                repository_id: row.get::<i64>(0)?,
                license_id: row.get::<String>(1)?,
                license_content: row.get::<String>(2)?,
            })),
            None => Ok(None),
        }
    }

    /// Insert or replace the license record for its repository.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the statement fails.
    pub async fn upsert_license(&self, record: &LicenseRecord) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO license_records (repository_id, license_id, license_content)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(repository_id) DO UPDATE SET
                   license_id = excluded.license_id,
                   license_content = excluded.license_content",
                libsql::params![
                    record.repository_id,
                    record.license_id.as_str(),
                    record.license_content.as_str()
                ],
            )
            .await?;
        Ok(())
    }
}
