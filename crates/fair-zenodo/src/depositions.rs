//! Deposition lifecycle operations.

use crate::error::ZenodoError;
use crate::http::check_response;
use crate::types::ZenodoDepositionInfo;
use crate::ZenodoClient;

impl ZenodoClient {
    /// Create a new deposition with empty metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] if the request fails or Zenodo returns a
    /// non-success status.
    pub async fn create_deposition(&self) -> Result<ZenodoDepositionInfo, ZenodoError> {
        let url = self.url("/deposit/depositions");
        tracing::info!(%url, "creating a new Zenodo deposition");
        let resp = self
            .http()
            .post(&url)
            .bearer_auth(self.token())
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// Fetch a deposition by id.
    ///
    /// Tries the latest published version first. A 404 there does not mean
    /// the deposition is gone — the id may belong to an unpublished draft,
    /// which only the draft-specific endpoint can see, so 404 falls back to
    /// `GET /deposit/depositions/{id}` before failing.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] if both lookups fail.
    pub async fn fetch_deposition(&self, id: i64) -> Result<ZenodoDepositionInfo, ZenodoError> {
        let url = self.url(&format!("/records/{id}/versions/latest"));
        tracing::info!(deposition_id = id, "fetching Zenodo deposition");
        let resp = self
            .http()
            .get(&url)
            .bearer_auth(self.token())
            .send()
            .await?;

        if resp.status().as_u16() == 404 {
            tracing::info!(
                deposition_id = id,
                "latest-version lookup returned 404, retrying as draft"
            );
            let draft_url = self.url(&format!("/deposit/depositions/{id}"));
            let draft_resp = self
                .http()
                .get(&draft_url)
                .bearer_auth(self.token())
                .send()
                .await?;
            return Ok(check_response(draft_resp).await?.json().await?);
        }

        Ok(check_response(resp).await?.json().await?)
    }

    /// Request a new version of a submitted deposition. The response is a
    /// fresh draft chained to the submitted one.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] on transport failure or non-success status.
    pub async fn new_version(&self, id: i64) -> Result<ZenodoDepositionInfo, ZenodoError> {
        let url = self.url(&format!("/deposit/depositions/{id}/actions/newversion"));
        tracing::info!(deposition_id = id, "creating a new deposition version");
        let resp = self
            .http()
            .post(&url)
            .bearer_auth(self.token())
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// Delete one file from a deposition draft.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] on transport failure or non-success status.
    pub async fn delete_file(&self, record_id: i64, filename: &str) -> Result<(), ZenodoError> {
        let url = self.url(&format!(
            "/records/{record_id}/draft/files/{}",
            urlencoding::encode(filename)
        ));
        tracing::info!(record_id, filename, "deleting draft file");
        let resp = self
            .http()
            .delete(&url)
            .bearer_auth(self.token())
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// Publish a deposition draft.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] on transport failure or non-success status.
    pub async fn publish(&self, id: i64) -> Result<ZenodoDepositionInfo, ZenodoError> {
        let url = self.url(&format!("/deposit/depositions/{id}/actions/publish"));
        tracing::info!(deposition_id = id, "publishing Zenodo deposition");
        let resp = self
            .http()
            .post(&url)
            .bearer_auth(self.token())
            .send()
            .await?;
        let published: ZenodoDepositionInfo = check_response(resp).await?.json().await?;
        if let Some(link) = &published.links.latest_html {
            tracing::info!(%link, "deposition published");
        }
        Ok(published)
    }

    /// Verify the client's token by listing the user's depositions.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError::InvalidToken`] when Zenodo rejects the token.
    pub async fn verify_token(&self) -> Result<(), ZenodoError> {
        let url = self.url("/deposit/depositions");
        let resp = self
            .http()
            .get(&url)
            .bearer_auth(self.token())
            .send()
            .await?;
        match check_response(resp).await {
            Ok(_) => Ok(()),
            Err(ZenodoError::Api { status, message }) => Err(ZenodoError::InvalidToken(format!(
                "depositions list returned {status}: {message}"
            ))),
            Err(other) => Err(other),
        }
    }
}
