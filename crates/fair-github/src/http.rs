//! Shared HTTP response helpers for the GitHub client.

use crate::error::GithubError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success; otherwise reads the body and
/// wraps status + body into [`GithubError::Api`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GithubError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        return Err(GithubError::Api {
            status,
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
