//! `fairkit identifiers` — classify and prioritize archival identifiers.

use std::path::Path;

use anyhow::Context;

use fair_identifiers::{classify_identifiers, prioritize};

pub fn handle(codemeta: Option<&Path>, citation: Option<&Path>) -> anyhow::Result<()> {
    let codemeta = read_optional(codemeta)?;
    let citation = read_optional(citation)?;

    let classified = classify_identifiers(codemeta.as_deref(), citation.as_deref());
    let prioritized = prioritize(classified);

    let report = serde_json::json!({
        "offer": prioritized.offer(),
        "primary": prioritized.primary,
        "others": prioritized.others,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(|p| {
        std::fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
    })
    .transpose()
}
