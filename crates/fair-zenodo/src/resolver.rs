//! Draft deposition resolution.
//!
//! Turns a deposition reference into a clean, file-empty draft the pipeline
//! can upload into:
//! - `new` creates a fresh deposition (file-empty by construction)
//! - an unsubmitted draft has its residual files deleted in place
//! - a submitted deposition gets a new version, whose carried-over files
//!   are deleted the same way
//!
//! File deletions run sequentially; the first failure is fatal and already
//! deleted files are not restored. Idempotent re-runs of the pipeline rely
//! on exactly this cleanup.

use crate::error::ZenodoError;
use crate::types::ZenodoDepositionInfo;
use crate::{DepositionRef, ZenodoClient};

/// What to do with a fetched deposition. Factored out of the I/O path so
/// the branch logic is testable without a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvePlan {
    /// An unsubmitted draft: clean its files and reuse it as-is.
    CleanDraft,
    /// A submitted deposition: request a new version, then clean the new
    /// draft's files.
    NewVersion,
}

impl ResolvePlan {
    /// Decide the plan for a fetched deposition.
    #[must_use]
    pub const fn for_deposition(info: &ZenodoDepositionInfo) -> Self {
        if info.submitted {
            Self::NewVersion
        } else {
            Self::CleanDraft
        }
    }
}

impl ZenodoClient {
    /// Resolve `deposition_ref` into a file-empty draft deposition.
    ///
    /// # Errors
    ///
    /// Any non-success Zenodo response at any step is fatal; partial file
    /// deletions that already succeeded are not undone.
    pub async fn resolve_draft(
        &self,
        deposition_ref: &DepositionRef,
    ) -> Result<ZenodoDepositionInfo, ZenodoError> {
        let id = match deposition_ref {
            DepositionRef::New => {
                let created = self.create_deposition().await?;
                tracing::info!(deposition_id = created.id, "created new deposition");
                return Ok(created);
            }
            DepositionRef::Existing(id) => *id,
        };

        let fetched = self.fetch_deposition(id).await?;

        match ResolvePlan::for_deposition(&fetched) {
            ResolvePlan::CleanDraft => {
                tracing::info!(
                    deposition_id = fetched.id,
                    files = fetched.files.len(),
                    "deposition is an unsubmitted draft, deleting residual files"
                );
                self.delete_all_files(&fetched).await?;
                let mut cleaned = fetched;
                cleaned.files.clear();
                Ok(cleaned)
            }
            ResolvePlan::NewVersion => {
                tracing::info!(
                    deposition_id = fetched.id,
                    "deposition is submitted, creating a new version"
                );
                let new_draft = self.new_version(fetched.id).await?;
                if !new_draft.files.is_empty() {
                    tracing::info!(
                        record_id = new_draft.effective_record_id(),
                        files = new_draft.files.len(),
                        "new version carried over files, deleting them"
                    );
                    self.delete_all_files(&new_draft).await?;
                }
                let mut cleaned = new_draft;
                cleaned.files.clear();
                Ok(cleaned)
            }
        }
    }

    /// Delete every file on a draft, sequentially, first failure fatal.
    async fn delete_all_files(&self, info: &ZenodoDepositionInfo) -> Result<(), ZenodoError> {
        let record_id = info.effective_record_id();
        for file in &info.files {
            self.delete_file(record_id, &file.filename)
                .await
                .map_err(|source| ZenodoError::FileCleanup {
                    filename: file.filename.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn deposition(submitted: bool) -> ZenodoDepositionInfo {
        serde_json::from_value(serde_json::json!({
            "id": 100,
            "submitted": submitted,
            "files": [{"filename": "old.zip"}]
        }))
        .unwrap()
    }

    #[test]
    fn unsubmitted_draft_is_cleaned_in_place() {
        assert_eq!(
            ResolvePlan::for_deposition(&deposition(false)),
            ResolvePlan::CleanDraft
        );
    }

    #[test]
    fn submitted_deposition_gets_new_version() {
        assert_eq!(
            ResolvePlan::for_deposition(&deposition(true)),
            ResolvePlan::NewVersion
        );
    }
}
