//! Liner Notes - artist and album aggregation service.
//!
//! Resolves artists and albums from MusicBrainz, enriches them with a
//! Wikipedia biography and a Discogs review, and caches the merged records.
//! Runs as an HTTP server by default; subcommands resolve single lookups
//! from the terminal.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod resolver;
pub mod server;
pub mod sources;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, filter::Directive, fmt, prelude::*};

/// Log directive used when `RUST_LOG` does not mention this crate
const DEFAULT_LOG_DIRECTIVE: &str = "liner_notes=info";

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    let directive: Directive = DEFAULT_LOG_DIRECTIVE.parse()?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(directive))
        .init();

    cli::run_command(&args)
}
