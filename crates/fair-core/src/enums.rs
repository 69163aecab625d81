//! Status enums for Fairkit.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DepositionStatus
// ---------------------------------------------------------------------------

/// Status of a repository's archival deposition lifecycle.
///
/// ```text
/// draft → in_progress → published
///                     → error
/// published → in_progress  (a fresh publish command re-enters the pipeline)
/// error     → in_progress  (the user must re-trigger; no automatic retry)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DepositionStatus {
    Draft,
    InProgress,
    Published,
    Error,
}

impl DepositionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::InProgress, Self::Error],
            Self::InProgress => &[Self::Published, Self::Error],
            // Published and Error records only move again when a new publish
            // command resets the row to in_progress.
            Self::Published | Self::Error => &[Self::InProgress],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Published => "published",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DepositionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
