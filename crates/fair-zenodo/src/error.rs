//! Zenodo client error types.

use thiserror::Error;

/// Errors that can occur when talking to the Zenodo REST API.
#[derive(Debug, Error)]
pub enum ZenodoError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Zenodo returned a non-success status code. The response body is
    /// captured verbatim for diagnostics.
    #[error("Zenodo API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by Zenodo.
        status: u16,
        /// Response body, as received.
        message: String,
    },

    /// The stored access token was rejected by Zenodo.
    #[error("Zenodo token is missing or invalid: {0}")]
    InvalidToken(String),

    /// Deleting a residual draft file failed; the filename is named so the
    /// operator knows where cleanup stopped.
    #[error("failed to delete draft file '{filename}': {source}")]
    FileCleanup {
        filename: String,
        #[source]
        source: Box<ZenodoError>,
    },
}
