//! # fair-github
//!
//! GitHub REST client for Fairkit's archival pipeline.
//!
//! Covers the repository surface the pipeline needs:
//! - release lookup (with assets) and the final draft flip
//! - release-asset and source-archive downloads
//! - file contents get/put for CITATION.cff and codemeta.json rewrites
//!
//! All operations are Bearer-token authenticated against a configurable API
//! base, so GitHub Enterprise hosts work unchanged.

mod contents;
mod error;
mod http;
mod releases;
mod types;

pub use error::GithubError;
pub use types::{Release, ReleaseAsset, RepoFile};

/// HTTP client for the GitHub REST API, scoped to a single repository.
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
    owner: String,
    repo: String,
}

impl GithubClient {
    /// Create a client against `api_base` (e.g. `https://api.github.com`)
    /// for the repository `owner/repo`, using `token` for Bearer
    /// authentication.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("fairkit/0.1")
                .build()
                .expect("reqwest client should build"),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// The repository this client is scoped to, as `owner/repo`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    /// Build a URL under `/repos/{owner}/{repo}`.
    pub(crate) fn repo_url(&self, path: &str) -> String {
        format!("{}/repos/{}/{}{path}", self.api_base, self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn repo_url_is_scoped() {
        let client = GithubClient::new("https://api.github.com/", "tok", "fairkit", "demo");
        assert_eq!(
            client.repo_url("/releases/42"),
            "https://api.github.com/repos/fairkit/demo/releases/42"
        );
        assert_eq!(client.full_name(), "fairkit/demo");
    }
}
