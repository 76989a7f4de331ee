//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `serve`: the HTTP server
//! - `resolve`: one-shot artist, album and search lookups

mod resolve;
mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::db;
use crate::error::{Result, ResultExt};
use crate::resolver::{CatalogResolver, DEFAULT_SEARCH_LIMIT};
use crate::sources::{DiscogsClient, MusicBrainzClient, WikipediaClient};

pub use resolve::{cmd_album, cmd_artist, cmd_search};
pub use serve::cmd_serve;

/// Liner Notes CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "LINER_NOTES_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run the HTTP server (the default)
    Serve {
        /// Port to listen on, overriding the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Resolve an artist by MusicBrainz id and print it as JSON
    Artist {
        /// MusicBrainz artist id
        id: String,
    },
    /// Resolve an album by MusicBrainz release group id and print it as JSON
    Album {
        /// MusicBrainz release group id
        id: String,
    },
    /// Search artists by name
    Search {
        query: String,
        /// Results per page (1-100)
        #[arg(short, long, default_value_t = i64::from(DEFAULT_SEARCH_LIMIT))]
        limit: i64,
        /// Results to skip
        #[arg(short, long, default_value_t = 0)]
        offset: i64,
    },
}

/// Run the specified CLI command, serving HTTP when none is given.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load(cli.config.as_deref())?;
    let rt = Runtime::new()?;

    match &cli.command {
        None => cmd_serve(&rt, config, None),
        Some(Commands::Serve { port }) => cmd_serve(&rt, config, *port),
        Some(Commands::Artist { id }) => cmd_artist(&rt, &config, id),
        Some(Commands::Album { id }) => cmd_album(&rt, &config, id),
        Some(Commands::Search {
            query,
            limit,
            offset,
        }) => cmd_search(&rt, &config, query, *limit, *offset),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Wire the configured store and provider clients into a resolver
pub(crate) async fn build_resolver(config: &Config) -> Result<CatalogResolver> {
    let repository = db::open_store(&config.database)
        .await
        .with_context("Failed to open cache store")?;
    let musicbrainz = MusicBrainzClient::new(&config.musicbrainz)
        .with_context("Invalid MusicBrainz settings")?;
    let wikipedia =
        WikipediaClient::new(&config.wikipedia).with_context("Invalid Wikipedia settings")?;
    let discogs = DiscogsClient::new(&config.discogs).with_context("Invalid Discogs settings")?;

    Ok(CatalogResolver::new(
        repository,
        Arc::new(musicbrainz),
        Arc::new(wikipedia),
        Arc::new(discogs),
    )
    .with_config(&config.resolver))
}
