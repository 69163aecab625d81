//! Shared HTTP response helpers for the Zenodo client.
//!
//! Centralizes status-code checks so individual operation modules stay
//! focused on request construction and response mapping. Non-success
//! responses capture the body verbatim into [`ZenodoError::Api`].

use crate::error::ZenodoError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success; otherwise reads the body and
/// wraps status + body into [`ZenodoError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ZenodoError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        return Err(ZenodoError::Api {
            status,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
