//! GitHub API response types.
//!
//! Only the fields the pipeline reads are modeled; everything else in the
//! responses is dropped at deserialization time.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;

use crate::error::GithubError;

/// A repository release.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub id: i64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub draft: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// A binary asset attached to a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

/// A file fetched through the contents API.
///
/// `content` arrives base64-encoded with embedded newlines; [`RepoFile::decode`]
/// strips those and yields the raw text. The `sha` is the blob SHA required
/// to update the file in place.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoFile {
    pub path: String,
    pub sha: String,
    pub content: String,
}

impl RepoFile {
    /// Decode the base64 content into UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::ContentDecode`] if the content is not valid
    /// base64 or not valid UTF-8.
    pub fn decode(&self) -> Result<String, GithubError> {
        let stripped: String = self.content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = STANDARD
            .decode(stripped)
            .map_err(|e| GithubError::ContentDecode {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        String::from_utf8(bytes).map_err(|e| GithubError::ContentDecode {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
