//! `fairkit publish` — run the archival pipeline.

use std::path::Path;

use anyhow::Context;

use fair_config::FairConfig;
use fair_db::FairDb;
use fair_github::GithubClient;
use fair_release::{Publisher, parse_publish_command};

pub async fn handle(owner: &str, repo: &str, repo_id: i64, issue_body: &Path) -> anyhow::Result<()> {
    let config = FairConfig::load_with_dotenv().context("failed to load configuration")?;
    config.github.ensure_configured()?;

    let body = std::fs::read_to_string(issue_body)
        .with_context(|| format!("failed to read issue body from {}", issue_body.display()))?;
    let command = parse_publish_command(&body)?;

    let db = FairDb::open_local(&config.db.path)
        .await
        .context("failed to open database")?;
    let github = GithubClient::new(&config.github.api_base, &config.github.token, owner, repo);

    let publisher = Publisher::new(&db, github, &config.zenodo.api_endpoint, repo_id, repo);
    let doi = publisher.publish(&command).await?;

    println!("published {owner}/{repo} {} as {doi}", command.tag);
    println!("dashboard: {}", config.app.release_dashboard_url(owner, repo));
    Ok(())
}
