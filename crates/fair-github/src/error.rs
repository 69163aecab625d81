//! GitHub client error types.

use thiserror::Error;

/// Errors that can occur when talking to the GitHub REST API.
#[derive(Debug, Error)]
pub enum GithubError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub returned a non-success status code.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by GitHub.
        status: u16,
        /// Response body, as received.
        message: String,
    },

    /// A file fetched through the contents API could not be decoded.
    #[error("failed to decode content of '{path}': {reason}")]
    ContentDecode { path: String, reason: String },
}
