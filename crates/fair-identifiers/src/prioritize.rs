//! Identifier ordering and primary selection.

use serde::Serialize;

use crate::{ClassifiedIdentifier, IdentifierKind};

/// Which archival message a repository should see, based on how many
/// identifiers its metadata files already carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivalOffer {
    /// No identifiers found — offer the first archival release.
    FirstRelease,
    /// Exactly one identifier found.
    SingleIdentifier,
    /// Several identifiers found; the primary is still a Zenodo DOI when
    /// one exists, even if it is not the most recent entry.
    MultipleIdentifiers,
}

/// Classified identifiers ordered by priority, with the primary split out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrioritizedIdentifiers {
    pub primary: Option<ClassifiedIdentifier>,
    pub others: Vec<ClassifiedIdentifier>,
}

impl PrioritizedIdentifiers {
    #[must_use]
    pub fn offer(&self) -> ArchivalOffer {
        match (&self.primary, self.others.len()) {
            (None, _) => ArchivalOffer::FirstRelease,
            (Some(_), 0) => ArchivalOffer::SingleIdentifier,
            (Some(_), _) => ArchivalOffer::MultipleIdentifiers,
        }
    }
}

/// Order identifiers `ZenodoDoi < OtherDoi < NonDoi` (stable — ties keep
/// input order) and select the first as primary.
#[must_use]
pub fn prioritize(mut identifiers: Vec<ClassifiedIdentifier>) -> PrioritizedIdentifiers {
    identifiers.sort_by_key(|id| id.kind);

    if identifiers.is_empty() {
        return PrioritizedIdentifiers {
            primary: None,
            others: Vec::new(),
        };
    }

    let others = identifiers.split_off(1);
    PrioritizedIdentifiers {
        primary: identifiers.pop(),
        others,
    }
}
