//! CITATION.cff and codemeta.json rewriting.
//!
//! After a draft deposition reserves a DOI, both metadata files on the
//! default branch are updated to carry it, along with the release version,
//! the license, and today's date. Each file is committed back through the
//! contents API with its current blob sha. A missing file is skipped, not
//! an error.

use chrono::NaiveDate;
use serde_json::{Value, json};

use fair_github::GithubClient;
use fair_identifiers::bare_doi;

use crate::error::ReleaseError;

const CITATION_PATH: &str = "CITATION.cff";
const CODEMETA_PATH: &str = "codemeta.json";

/// Values written into the metadata files.
pub struct MetadataUpdate<'a> {
    /// The reserved DOI, bare or as a resolver URL.
    pub doi: &'a str,
    /// Release version (stored payload's version when present, else the tag).
    pub version: &'a str,
    /// SPDX license id, e.g. `MIT`.
    pub license_id: &'a str,
    pub today: NaiveDate,
}

/// Rewrite a CITATION.cff document.
///
/// Sets `doi` (always the bare DOI), `version`, `license`, and
/// `date-released`. Everything else in the document is preserved.
///
/// # Errors
///
/// Returns [`ReleaseError::Validation`] if the document is not a YAML map.
pub fn rewrite_citation(content: &str, update: &MetadataUpdate<'_>) -> Result<String, ReleaseError> {
    let mut doc: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| ReleaseError::Validation(format!("CITATION.cff is not valid YAML: {e}")))?;
    let map = doc
        .as_mapping_mut()
        .ok_or_else(|| ReleaseError::Validation("CITATION.cff is not a YAML map".to_string()))?;

    let doi = bare_doi(update.doi).unwrap_or_else(|| update.doi.to_string());
    map.insert("doi".into(), doi.into());
    map.insert("version".into(), update.version.into());
    map.insert("license".into(), update.license_id.into());
    map.insert(
        "date-released".into(),
        update.today.format("%Y-%m-%d").to_string().into(),
    );

    serde_yaml::to_string(&doc)
        .map_err(|e| ReleaseError::Validation(format!("failed to serialize CITATION.cff: {e}")))
}

/// Rewrite a codemeta.json document.
///
/// Sets `identifier` (the DOI as given), `version`, `license` (SPDX details
/// URL), and `dateModified`. Everything else in the document is preserved.
///
/// # Errors
///
/// Returns [`ReleaseError::Validation`] if the document is not a JSON object.
pub fn rewrite_codemeta(content: &str, update: &MetadataUpdate<'_>) -> Result<String, ReleaseError> {
    let mut doc: Value = serde_json::from_str(content)
        .map_err(|e| ReleaseError::Validation(format!("codemeta.json is not valid JSON: {e}")))?;
    let map = doc
        .as_object_mut()
        .ok_or_else(|| ReleaseError::Validation("codemeta.json is not a JSON object".to_string()))?;

    map.insert("identifier".to_string(), json!(update.doi));
    map.insert("version".to_string(), json!(update.version));
    map.insert(
        "license".to_string(),
        json!(format!("https://spdx.org/licenses/{}", update.license_id)),
    );
    map.insert(
        "dateModified".to_string(),
        json!(update.today.format("%Y-%m-%d").to_string()),
    );

    serde_json::to_string_pretty(&doc)
        .map_err(|e| ReleaseError::Validation(format!("failed to serialize codemeta.json: {e}")))
}

/// Fetch, rewrite, and commit both metadata files.
///
/// The two fetches are independent reads and run concurrently; commits run
/// sequentially afterwards so a failure leaves at most one file updated.
///
/// # Errors
///
/// Returns [`ReleaseError`] on any fetch, rewrite, or commit failure.
pub async fn commit_metadata_files(
    github: &GithubClient,
    update: &MetadataUpdate<'_>,
) -> Result<(), ReleaseError> {
    let (citation, codemeta) = tokio::try_join!(
        github.get_file(CITATION_PATH),
        github.get_file(CODEMETA_PATH)
    )?;

    if let Some(file) = citation {
        let rewritten = rewrite_citation(&file.decode()?, update)?;
        github
            .put_file(
                CITATION_PATH,
                &rewritten,
                "chore: update CITATION.cff for archival release",
                Some(&file.sha),
            )
            .await?;
    } else {
        tracing::warn!("no CITATION.cff on default branch, skipping rewrite");
    }

    if let Some(file) = codemeta {
        let rewritten = rewrite_codemeta(&file.decode()?, update)?;
        github
            .put_file(
                CODEMETA_PATH,
                &rewritten,
                "chore: update codemeta.json for archival release",
                Some(&file.sha),
            )
            .await?;
    } else {
        tracing::warn!("no codemeta.json on default branch, skipping rewrite");
    }

    Ok(())
}
