//! Bucket uploads.

use crate::error::ZenodoError;
use crate::http::check_response;
use crate::ZenodoClient;

impl ZenodoClient {
    /// PUT a binary blob into a deposition's bucket under `filename`.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] on transport failure or non-success status.
    pub async fn upload_to_bucket(
        &self,
        bucket_url: &str,
        filename: &str,
        body: Vec<u8>,
    ) -> Result<(), ZenodoError> {
        let url = format!(
            "{}/{}",
            bucket_url.trim_end_matches('/'),
            urlencoding::encode(filename)
        );
        tracing::info!(%url, bytes = body.len(), "uploading file to deposition bucket");
        let resp = self
            .http()
            .put(&url)
            .bearer_auth(self.token())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}
