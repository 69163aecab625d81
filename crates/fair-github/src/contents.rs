//! Repository contents operations.
//!
//! The pipeline uses these to rewrite CITATION.cff and codemeta.json on the
//! default branch after a successful archival.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::error::GithubError;
use crate::http::check_response;
use crate::types::RepoFile;
use crate::GithubClient;

impl GithubClient {
    /// Fetch a file from the repository's default branch.
    ///
    /// Returns `Ok(None)` on 404 so callers can treat a missing metadata
    /// file as "nothing to rewrite".
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or any non-success
    /// status other than 404.
    pub async fn get_file(&self, path: &str) -> Result<Option<RepoFile>, GithubError> {
        let url = self.repo_url(&format!("/contents/{path}"));
        let resp = self
            .http()
            .get(&url)
            .bearer_auth(self.token())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check_response(resp).await?.json().await?))
    }

    /// Create or update a file on the repository's default branch.
    ///
    /// `sha` must be the current blob SHA when updating an existing file;
    /// pass `None` to create a new one.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError`] on transport failure or non-success status
    /// (including the 409 GitHub returns on a stale blob SHA).
    pub async fn put_file(
        &self,
        path: &str,
        content: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<(), GithubError> {
        let url = self.repo_url(&format!("/contents/{path}"));
        let mut payload = serde_json::json!({
            "message": message,
            "content": STANDARD.encode(content),
        });
        if let (Some(sha), Some(map)) = (sha, payload.as_object_mut()) {
            map.insert("sha".to_string(), serde_json::Value::String(sha.to_string()));
        }
        tracing::info!(path, "committing file update");
        let resp = self
            .http()
            .put(&url)
            .bearer_auth(self.token())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}
