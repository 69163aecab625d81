//! Publish pipeline orchestration.
//!
//! Sequences one archival run end to end: persist the in-progress record,
//! validate the repository's metadata files, resolve a clean Zenodo draft,
//! rewrite the metadata files with the reserved DOI, push synthesized
//! metadata, transfer the release assets, publish on both sides, and
//! persist the outcome.
//!
//! Every failure between the in-progress transition and the final persist
//! is caught at one boundary: the record moves to `error` and the failure
//! is returned. Nothing external is rolled back; idempotent re-runs rely
//! on the draft resolver clearing residual files.

use chrono::Utc;
use serde_json::Value;

use fair_core::entities::DepositionRecord;
use fair_core::enums::DepositionStatus;
use fair_db::FairDb;
use fair_github::GithubClient;
use fair_zenodo::ZenodoClient;

use crate::command::PublishCommand;
use crate::error::ReleaseError;
use crate::metadata_files::{MetadataUpdate, commit_metadata_files};
use crate::synthesize::{SynthesisInput, synthesize};
use crate::transfer::{transfer, upload_plan};

/// One publish run for one repository.
pub struct Publisher<'a> {
    db: &'a FairDb,
    github: GithubClient,
    /// Zenodo API base, e.g. `https://zenodo.org/api`.
    zenodo_api_base: String,
    repository_id: i64,
    repo_name: String,
}

impl<'a> Publisher<'a> {
    #[must_use]
    pub fn new(
        db: &'a FairDb,
        github: GithubClient,
        zenodo_api_base: impl Into<String>,
        repository_id: i64,
        repo_name: impl Into<String>,
    ) -> Self {
        Self {
            db,
            github,
            zenodo_api_base: zenodo_api_base.into(),
            repository_id,
            repo_name: repo_name.into(),
        }
    }

    /// Run the full pipeline for a parsed publish command.
    ///
    /// Returns the minted DOI on success.
    ///
    /// # Errors
    ///
    /// Any failing step returns [`ReleaseError`] after the record has been
    /// moved to `error` status. A run against a record already in progress
    /// fails up front without touching anything.
    pub async fn publish(&self, command: &PublishCommand) -> Result<String, ReleaseError> {
        self.begin_run(command).await?;

        match self.run_pipeline(command).await {
            Ok(doi) => Ok(doi),
            Err(err) => {
                tracing::error!(
                    repository_id = self.repository_id,
                    error = %err,
                    "publish pipeline failed, marking record as errored"
                );
                if let Err(db_err) = self
                    .db
                    .set_deposition_status(self.repository_id, DepositionStatus::Error)
                    .await
                {
                    tracing::error!(error = %db_err, "failed to persist error status");
                }
                Err(err)
            }
        }
    }

    /// Step 1: reject concurrent runs, then persist the in-progress record.
    async fn begin_run(&self, command: &PublishCommand) -> Result<(), ReleaseError> {
        let existing = self.db.get_deposition(self.repository_id).await?;
        if existing
            .as_ref()
            .is_some_and(|r| r.status == DepositionStatus::InProgress)
        {
            return Err(ReleaseError::AlreadyInProgress {
                repository_id: self.repository_id,
            });
        }

        let now = Utc::now();
        let record = DepositionRecord {
            repository_id: self.repository_id,
            zenodo_id: existing.as_ref().and_then(|r| r.zenodo_id),
            existing_deposition: existing
                .as_ref()
                .is_some_and(|r| r.existing_deposition),
            last_published_doi: existing.as_ref().and_then(|r| r.last_published_doi.clone()),
            status: DepositionStatus::InProgress,
            github_release_id: Some(command.release_id),
            github_tag_name: Some(command.tag.clone()),
            zenodo_metadata: existing
                .as_ref()
                .map_or_else(|| serde_json::json!({}), |r| r.zenodo_metadata.clone()),
            submitting_user: Some(command.submitted_by.clone()),
            created_at: existing.map_or(now, |r| r.created_at),
            updated_at: now,
        };
        self.db.upsert_deposition(&record).await?;
        tracing::info!(
            repository_id = self.repository_id,
            tag = %command.tag,
            user = %command.submitted_by,
            "publish run started"
        );
        Ok(())
    }

    /// Steps 2-9. Failures bubble up to [`Self::publish`]'s boundary.
    async fn run_pipeline(&self, command: &PublishCommand) -> Result<String, ReleaseError> {
        // Step 2: fetch + validate both metadata files.
        let (citation_file, codemeta_file) = tokio::try_join!(
            self.github.get_file("CITATION.cff"),
            self.github.get_file("codemeta.json")
        )?;
        let codemeta_file = codemeta_file.ok_or_else(|| {
            ReleaseError::Validation("codemeta.json not found on default branch".to_string())
        })?;
        let citation_file = citation_file.ok_or_else(|| {
            ReleaseError::Validation("CITATION.cff not found on default branch".to_string())
        })?;
        let codemeta: Value = serde_json::from_str(&codemeta_file.decode()?)
            .map_err(|e| ReleaseError::Validation(format!("codemeta.json: {e}")))?;
        validate_codemeta(&codemeta)?;
        let citation: serde_yaml::Value = serde_yaml::from_str(&citation_file.decode()?)
            .map_err(|e| ReleaseError::Validation(format!("CITATION.cff: {e}")))?;
        validate_citation(&citation)?;
        // License vetting belongs to validation: a Custom or unresolvable
        // license must abort before anything is written to Zenodo.
        let license_id = self.resolve_license_id(&codemeta).await?;

        // Step 3: token lookup and verification before any Zenodo mutation.
        let token = self
            .db
            .get_token(&command.submitted_by)
            .await?
            .ok_or_else(|| {
                ReleaseError::Validation(format!(
                    "no Zenodo token stored for user '{}'",
                    command.submitted_by
                ))
            })?;
        let zenodo = ZenodoClient::new(&self.zenodo_api_base, &token.token);
        zenodo.verify_token().await?;

        // Step 4: resolve a clean draft.
        let draft = zenodo.resolve_draft(&command.deposition_ref).await?;
        let record_id = draft.effective_record_id();
        let bucket_url = draft.links.bucket.clone().ok_or_else(|| {
            ReleaseError::Validation(format!("deposition {record_id} has no bucket link"))
        })?;
        let doi = draft
            .prereserved_doi()
            .map(String::from)
            .unwrap_or_else(|| format!("10.5281/zenodo.{record_id}"));
        let add_upload_type = draft.metadata.upload_type.as_deref().is_none_or(str::is_empty);

        let stored = self.db.get_deposition(self.repository_id).await?;
        let stored_metadata = stored
            .as_ref()
            .and_then(|r| r.zenodo_metadata.get("metadata").cloned());
        let today = Utc::now().date_naive();

        // Step 5: rewrite CITATION.cff / codemeta.json with the reserved DOI.
        let version = draft
            .metadata
            .version
            .clone()
            .unwrap_or_else(|| command.tag.clone());
        commit_metadata_files(
            &self.github,
            &MetadataUpdate {
                doi: &doi,
                version: &version,
                license_id: &license_id,
                today,
            },
        )
        .await?;

        // Step 6: synthesize and push deposition metadata.
        let license_record = self.db.get_license(self.repository_id).await?;
        let payload = synthesize(&SynthesisInput {
            codemeta: &codemeta,
            license: license_record.as_ref(),
            stored_metadata: stored_metadata.as_ref(),
            add_upload_type,
            today,
        })?;
        zenodo.put_metadata_healing(record_id, &payload).await?;

        let mut record = stored.ok_or_else(|| {
            ReleaseError::Validation("deposition record vanished mid-run".to_string())
        })?;
        record.zenodo_id = Some(record_id);
        record.existing_deposition = command.deposition_ref != fair_zenodo::DepositionRef::New;
        record.zenodo_metadata = payload.clone();
        self.db.upsert_deposition(&record).await?;

        // Step 7: move the release assets and the source archive.
        let release = self.github.get_release(command.release_id).await?;
        let plan = upload_plan(&release.assets, &self.repo_name, &command.tag);
        transfer(&self.github, &zenodo, &bucket_url, &plan).await?;

        // Step 8: publish on both sides.
        zenodo.publish(record_id).await?;
        self.github.publish_release(command.release_id).await?;

        // Step 9: persist the outcome.
        self.db
            .mark_published(self.repository_id, &doi, &payload)
            .await?;
        tracing::info!(
            repository_id = self.repository_id,
            %doi,
            "publish run complete"
        );
        Ok(doi)
    }

    /// License id for the file rewrite: codemeta's URL when present, else
    /// the stored record. Custom is rejected either way.
    async fn resolve_license_id(&self, codemeta: &Value) -> Result<String, ReleaseError> {
        use fair_core::entities::LicenseRecord;
        use fair_core::spdx;

        let url = codemeta
            .get("license")
            .and_then(Value::as_str)
            .map(String::from);
        let url = match url {
            Some(url) => url,
            None => self
                .db
                .get_license(self.repository_id)
                .await?
                .map(|r| r.spdx_url())
                .ok_or_else(|| {
                    ReleaseError::Validation(
                        "no license found in codemeta.json or stored record".to_string(),
                    )
                })?,
        };

        let id = spdx::license_id_from_url(&url)
            .ok_or(ReleaseError::UnknownLicense { url })?;
        if id == LicenseRecord::CUSTOM {
            return Err(ReleaseError::CustomLicense);
        }
        Ok(id.to_string())
    }
}

/// codemeta.json must be an object carrying `name`, `author`, `description`.
fn validate_codemeta(codemeta: &Value) -> Result<(), ReleaseError> {
    let Some(map) = codemeta.as_object() else {
        return Err(ReleaseError::Validation(
            "codemeta.json is not a JSON object".to_string(),
        ));
    };
    for field in ["name", "author", "description"] {
        if !map.contains_key(field) {
            return Err(ReleaseError::Validation(format!(
                "codemeta.json is missing required field '{field}'"
            )));
        }
    }
    Ok(())
}

/// CITATION.cff must be a map carrying `title` and `authors`.
fn validate_citation(citation: &serde_yaml::Value) -> Result<(), ReleaseError> {
    if citation.as_mapping().is_none() {
        return Err(ReleaseError::Validation(
            "CITATION.cff is not a YAML map".to_string(),
        ));
    }
    for field in ["title", "authors"] {
        if citation.get(field).is_none() {
            return Err(ReleaseError::Validation(format!(
                "CITATION.cff is missing required field '{field}'"
            )));
        }
    }
    Ok(())
}
