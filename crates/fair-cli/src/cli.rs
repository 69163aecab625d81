//! Clap command tree for the `fairkit` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `fairkit` binary.
#[derive(Debug, Parser)]
#[command(name = "fairkit", version, about = "FAIR software archival toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the archival pipeline for a release publish command.
    Publish {
        /// Repository owner (user or organization).
        #[arg(long)]
        owner: String,
        /// Repository name.
        #[arg(long)]
        repo: String,
        /// Numeric repository id (the deposition record key).
        #[arg(long)]
        repo_id: i64,
        /// Path to the issue body carrying the publish trigger comment.
        #[arg(long)]
        issue_body: PathBuf,
    },

    /// Classify and prioritize archival identifiers from metadata files.
    Identifiers {
        /// Path to codemeta.json.
        #[arg(long)]
        codemeta: Option<PathBuf>,
        /// Path to CITATION.cff.
        #[arg(long)]
        citation: Option<PathBuf>,
    },

    /// Print the persisted deposition record for a repository.
    Status {
        /// Numeric repository id.
        #[arg(long)]
        repo_id: i64,
    },
}
