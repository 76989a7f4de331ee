//! One-shot lookup commands.

use serde::Serialize;
use tokio::runtime::Runtime;

use super::build_resolver;
use crate::config::Config;

/// Resolve an artist and print it
pub fn cmd_artist(rt: &Runtime, config: &Config, id: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let resolver = build_resolver(config).await?;
        let artist = resolver.resolve_artist(id).await?;
        print_json(&artist)
    })
}

/// Resolve an album and print it
pub fn cmd_album(rt: &Runtime, config: &Config, id: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let resolver = build_resolver(config).await?;
        let album = resolver.resolve_album(id).await?;
        print_json(&album)
    })
}

/// Search artists and print the page
pub fn cmd_search(
    rt: &Runtime,
    config: &Config,
    query: &str,
    limit: i64,
    offset: i64,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let resolver = build_resolver(config).await?;
        let results = resolver.search_artists(query, limit, offset).await?;
        print_json(&results)
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
