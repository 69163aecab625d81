//! Release operations.

use crate::error::GithubError;
use crate::http::check_response;
use crate::types::Release;
use crate::GithubClient;

impl GithubClient {
    /// Fetch a release by id, including its asset list.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or non-success status.
    pub async fn get_release(&self, release_id: i64) -> Result<Release, GithubError> {
        let url = self.repo_url(&format!("/releases/{release_id}"));
        let resp = self
            .http()
            .get(&url)
            .bearer_auth(self.token())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// Download a release asset's raw bytes.
    ///
    /// Requesting `application/octet-stream` makes GitHub redirect to the
    /// asset storage; reqwest follows the redirect transparently.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or non-success status.
    pub async fn download_release_asset(&self, asset_id: i64) -> Result<Vec<u8>, GithubError> {
        let url = self.repo_url(&format!("/releases/assets/{asset_id}"));
        tracing::info!(asset_id, "downloading release asset");
        let resp = self
            .http()
            .get(&url)
            .bearer_auth(self.token())
            .header(reqwest::header::ACCEPT, "application/octet-stream")
            .send()
            .await?;
        Ok(check_response(resp).await?.bytes().await?.to_vec())
    }

    /// Download the source archive (zipball) for a tag.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or non-success status.
    pub async fn download_archive(&self, tag: &str) -> Result<Vec<u8>, GithubError> {
        let url = self.repo_url(&format!("/zipball/{tag}"));
        tracing::info!(tag, "downloading source archive");
        let resp = self
            .http()
            .get(&url)
            .bearer_auth(self.token())
            .send()
            .await?;
        Ok(check_response(resp).await?.bytes().await?.to_vec())
    }

    /// Flip a draft release to published.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or non-success status.
    pub async fn publish_release(&self, release_id: i64) -> Result<Release, GithubError> {
        let url = self.repo_url(&format!("/releases/{release_id}"));
        tracing::info!(release_id, "marking release as published");
        let resp = self
            .http()
            .patch(&url)
            .bearer_auth(self.token())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&serde_json::json!({ "draft": false }))
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }
}
