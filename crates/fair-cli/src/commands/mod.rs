//! Subcommand handlers.

pub mod identifiers;
pub mod publish;
pub mod status;
