//! # fair-identifiers
//!
//! Extraction, classification, and prioritization of scholarly identifiers
//! found in repository metadata files.
//!
//! Identifiers are read from `codemeta.json` (the `identifier` field) and
//! `CITATION.cff` (the `doi` scalar), normalized to DOIs where possible, and
//! classified as Zenodo DOIs, other DOIs, or plain identifiers. The
//! prioritized result decides which archival message a repository sees:
//! first-release, single-identifier, or multi-identifier.
//!
//! Everything here is ephemeral — computed per render from live file
//! content, never persisted. Malformed metadata files are logged and
//! treated as "no identifiers found"; they never fail the caller.

mod classify;
mod extract;
mod prioritize;

pub use classify::{bare_doi, classify_candidate};
pub use extract::{citation_candidates, classify_identifiers, codemeta_candidates};
pub use prioritize::{ArchivalOffer, PrioritizedIdentifiers, prioritize};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// What kind of identifier a candidate string turned out to be.
///
/// Ordering is the priority order used by [`prioritize`]: Zenodo DOIs
/// first, other DOIs next, everything else last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierKind {
    ZenodoDoi,
    OtherDoi,
    NonDoi,
}

/// Which metadata file produced an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierSource {
    Codemeta,
    Citation,
}

/// A classified identifier extracted from a metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassifiedIdentifier {
    pub kind: IdentifierKind,
    /// Normalized value: the bare DOI for DOI kinds, the trimmed input
    /// otherwise.
    pub value: String,
    /// Rendered form shown in dashboards. Mirrors `value` today; kept
    /// separate so display formatting can diverge without touching dedup.
    pub display_value: String,
    /// Record id suffix for Zenodo DOIs (`10.5281/zenodo.<N>` -> `<N>`).
    pub zenodo_id: Option<String>,
    pub source: IdentifierSource,
}
