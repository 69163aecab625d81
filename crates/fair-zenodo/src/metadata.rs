//! Deposition metadata updates.

use serde::Deserialize;

use crate::error::ZenodoError;
use crate::http::check_response;
use crate::ZenodoClient;

/// Echo of a deposition after a metadata PUT. Only the metadata block is
/// inspected; it stays opaque JSON because the pipeline persists it as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedDeposition {
    pub id: i64,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl UpdatedDeposition {
    /// Whether the echoed metadata carries an `upload_type`.
    #[must_use]
    pub fn has_upload_type(&self) -> bool {
        self.metadata
            .get("upload_type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| !s.is_empty())
    }
}

impl ZenodoClient {
    /// PUT a metadata payload (`{"metadata": {...}}`) onto a deposition.
    ///
    /// # Errors
    ///
    /// Any non-success response is fatal, with the response body captured
    /// verbatim in the error.
    pub async fn put_metadata(
        &self,
        record_id: i64,
        payload: &serde_json::Value,
    ) -> Result<UpdatedDeposition, ZenodoError> {
        let url = self.url(&format!("/deposit/depositions/{record_id}"));
        tracing::info!(record_id, "updating deposition metadata");
        let resp = self
            .http()
            .put(&url)
            .bearer_auth(self.token())
            .json(payload)
            .send()
            .await?;
        Ok(check_response(resp).await?.json().await?)
    }

    /// PUT a metadata payload, self-healing a dropped `upload_type`.
    ///
    /// Zenodo has been observed echoing metadata without the `upload_type`
    /// the payload carried. When that happens the corrected payload (echoed
    /// metadata + `upload_type: "software"`) is PUT exactly once more. The
    /// retry is bounded at one — if the server persistently drops the
    /// field, the second echo is returned as-is rather than looping.
    ///
    /// # Errors
    ///
    /// Returns [`ZenodoError`] if either PUT fails.
    pub async fn put_metadata_healing(
        &self,
        record_id: i64,
        payload: &serde_json::Value,
    ) -> Result<UpdatedDeposition, ZenodoError> {
        let updated = self.put_metadata(record_id, payload).await?;
        if updated.has_upload_type() {
            return Ok(updated);
        }

        tracing::warn!(
            record_id,
            "echoed metadata lacks upload_type, re-issuing PUT once"
        );
        let mut healed_metadata = updated.metadata;
        if let Some(map) = healed_metadata.as_object_mut() {
            map.insert(
                "upload_type".to_string(),
                serde_json::Value::String("software".to_string()),
            );
        }
        let healed_payload = serde_json::json!({ "metadata": healed_metadata });
        self.put_metadata(record_id, &healed_payload).await
    }
}
