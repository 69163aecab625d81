//! # fair-release
//!
//! The archival pipeline: publish-command parsing, deposition metadata
//! synthesis, CITATION.cff / codemeta.json rewriting, release-asset
//! transfer, and the orchestrator that sequences one publish run end to
//! end with a single error boundary persisting the failed state.

mod command;
mod error;
mod metadata_files;
mod orchestrator;
mod synthesize;
mod transfer;

pub use command::{PublishCommand, parse_publish_command};
pub use error::ReleaseError;
pub use metadata_files::{MetadataUpdate, commit_metadata_files, rewrite_citation, rewrite_codemeta};
pub use orchestrator::Publisher;
pub use synthesize::{SynthesisInput, synthesize};
pub use transfer::{UploadItem, transfer, upload_plan};
