//! Release asset transfer.
//!
//! Moves every release asset from GitHub into the Zenodo deposition bucket,
//! strictly sequentially, with the repository source archive uploaded last
//! as `{repo}-{tag}.zip`. The first failure aborts the run and the error
//! names the asset that failed.

use std::time::Instant;

use fair_github::GithubClient;
use fair_zenodo::ZenodoClient;

use crate::error::ReleaseError;

/// One upload in a transfer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadItem {
    /// A release asset, downloaded via the asset API.
    Asset { id: i64, name: String },
    /// The repository source archive, downloaded as a zipball.
    Archive { filename: String, tag: String },
}

impl UploadItem {
    /// The filename this item lands under in the bucket.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Asset { name, .. } => name,
            Self::Archive { filename, .. } => filename,
        }
    }
}

/// Build the ordered upload plan: assets in release order, archive last.
///
/// Factored out of the I/O path so the ordering is unit-testable.
#[must_use]
pub fn upload_plan(assets: &[fair_github::ReleaseAsset], repo: &str, tag: &str) -> Vec<UploadItem> {
    let mut plan: Vec<UploadItem> = assets
        .iter()
        .map(|asset| UploadItem::Asset {
            id: asset.id,
            name: asset.name.clone(),
        })
        .collect();
    plan.push(UploadItem::Archive {
        filename: format!("{repo}-{tag}.zip"),
        tag: tag.to_string(),
    });
    plan
}

/// Run the transfer: download each item from GitHub, upload it to the
/// deposition bucket, in plan order.
///
/// # Errors
///
/// Returns [`ReleaseError::AssetTransfer`] naming the first item that
/// failed; already-uploaded items are not removed.
pub async fn transfer(
    github: &GithubClient,
    zenodo: &ZenodoClient,
    bucket_url: &str,
    plan: &[UploadItem],
) -> Result<(), ReleaseError> {
    if plan.len() == 1 {
        tracing::warn!("release has no assets, uploading source archive only");
    }

    let started = Instant::now();
    for item in plan {
        upload_one(github, zenodo, bucket_url, item)
            .await
            .map_err(|source| ReleaseError::AssetTransfer {
                asset: item.filename().to_string(),
                source: Box::new(source),
            })?;
    }
    tracing::info!(
        files = plan.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "asset transfer complete"
    );
    Ok(())
}

async fn upload_one(
    github: &GithubClient,
    zenodo: &ZenodoClient,
    bucket_url: &str,
    item: &UploadItem,
) -> Result<(), ReleaseError> {
    let bytes = match item {
        UploadItem::Asset { id, .. } => github.download_release_asset(*id).await?,
        UploadItem::Archive { tag, .. } => github.download_archive(tag).await?,
    };
    zenodo
        .upload_to_bucket(bucket_url, item.filename(), bytes)
        .await?;
    Ok(())
}
