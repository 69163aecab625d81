//! # fair-zenodo
//!
//! Zenodo REST client for Fairkit's archival pipeline.
//!
//! Covers the deposit API surface the pipeline needs:
//! - deposition creation, fetch (with the 404 draft fallback), versioning
//! - draft-file cleanup and draft resolution
//! - metadata update with the one-shot `upload_type` healing retry
//! - bucket uploads and the publish action
//! - token verification against the depositions list
//!
//! All operations are Bearer-token authenticated against a configurable API
//! base, so the sandbox (`https://sandbox.zenodo.org/api`) works unchanged.

mod bucket;
mod depositions;
mod error;
mod http;
mod metadata;
mod resolver;
mod types;

pub use error::ZenodoError;
pub use metadata::UpdatedDeposition;
pub use resolver::ResolvePlan;
pub use types::{
    DepositionFile, DepositionLinks, DepositionMetadata, PrereserveDoi, ZenodoDepositionInfo,
};

/// Deposition reference accepted by the publish command: a fresh deposition
/// or an existing one to version-chain from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositionRef {
    New,
    Existing(i64),
}

impl std::str::FromStr for DepositionRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "new" {
            return Ok(Self::New);
        }
        s.parse::<i64>()
            .map(Self::Existing)
            .map_err(|_| format!("deposition reference must be 'new' or a numeric id, got '{s}'"))
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the Zenodo deposit API.
///
/// Constructed per orchestration run with the submitting user's token.
pub struct ZenodoClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl ZenodoClient {
    /// Create a client against `api_base` (e.g. `https://zenodo.org/api`)
    /// using `token` for Bearer authentication.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("fairkit/0.1")
                .build()
                .expect("reqwest client should build"),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deposition_ref_parses() {
        assert_eq!("new".parse::<DepositionRef>().unwrap(), DepositionRef::New);
        assert_eq!(
            "1003150".parse::<DepositionRef>().unwrap(),
            DepositionRef::Existing(1_003_150)
        );
        assert!("latest".parse::<DepositionRef>().is_err());
    }

    #[test]
    fn api_base_trailing_slash_is_normalized() {
        let client = ZenodoClient::new("https://zenodo.org/api/", "tok");
        assert_eq!(
            client.url("/deposit/depositions"),
            "https://zenodo.org/api/deposit/depositions"
        );
    }
}
