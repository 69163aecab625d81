//! `fairkit` — FAIR software archival toolkit.
//!
//! Wires config, database, and API clients into the publish pipeline, the
//! identifier classifier, and the status reader.

use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("fairkit error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    match cli.command {
        cli::Commands::Publish {
            owner,
            repo,
            repo_id,
            issue_body,
        } => commands::publish::handle(&owner, &repo, repo_id, &issue_body).await,
        cli::Commands::Identifiers { codemeta, citation } => {
            commands::identifiers::handle(codemeta.as_deref(), citation.as_deref())
        }
        cli::Commands::Status { repo_id } => commands::status::handle(repo_id).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FAIRKIT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
