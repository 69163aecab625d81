//! `fairkit status` — print the persisted deposition record.

use anyhow::Context;

use fair_config::FairConfig;
use fair_db::FairDb;

pub async fn handle(repo_id: i64) -> anyhow::Result<()> {
    let config = FairConfig::load_with_dotenv().context("failed to load configuration")?;
    let db = FairDb::open_local(&config.db.path)
        .await
        .context("failed to open database")?;

    match db.get_deposition(repo_id).await? {
        Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
        None => println!("no deposition record for repository {repo_id}"),
    }
    Ok(())
}
