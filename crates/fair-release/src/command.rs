//! Publish trigger parsing.
//!
//! A publish run is triggered by an HTML comment in a GitHub issue body:
//!
//! ```text
//! <!-- @codefair-bot publish-zenodo 1003150 271117 v2.1.0 alice -->
//! ```
//!
//! The four whitespace-separated fields are the deposition reference
//! (`new` or a numeric id), the GitHub release id, the tag, and the
//! submitting username.

use lazy_regex::{Lazy, Regex, lazy_regex};

use fair_zenodo::DepositionRef;

use crate::error::ReleaseError;

static PUBLISH_TRIGGER: Lazy<Regex> =
    lazy_regex!(r"<!--\s*@codefair-bot\s*publish-zenodo\s*([\s\S]*?)-->");

/// A parsed publish command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCommand {
    pub deposition_ref: DepositionRef,
    pub release_id: i64,
    pub tag: String,
    pub submitted_by: String,
}

/// Extract and parse the publish command from an issue body.
///
/// # Errors
///
/// Returns [`ReleaseError::CommandParse`] when the trigger marker is absent
/// or its payload does not split into the four expected fields.
pub fn parse_publish_command(issue_body: &str) -> Result<PublishCommand, ReleaseError> {
    let captured = PUBLISH_TRIGGER
        .captures(issue_body)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ReleaseError::CommandParse("no publish-zenodo trigger found".to_string()))?
        .as_str()
        .trim();

    let fields: Vec<&str> = captured.split_whitespace().collect();
    let [deposition_ref, release_id, tag, submitted_by] = fields.as_slice() else {
        return Err(ReleaseError::CommandParse(format!(
            "expected 4 fields (deposition, release id, tag, username), got {}",
            fields.len()
        )));
    };

    let deposition_ref = deposition_ref
        .parse::<DepositionRef>()
        .map_err(ReleaseError::CommandParse)?;
    let release_id = release_id
        .parse::<i64>()
        .map_err(|_| ReleaseError::CommandParse(format!("release id '{release_id}' is not numeric")))?;

    Ok(PublishCommand {
        deposition_ref,
        release_id,
        tag: (*tag).to_string(),
        submitted_by: (*submitted_by).to_string(),
    })
}
