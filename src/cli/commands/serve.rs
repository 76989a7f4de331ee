//! HTTP server command.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::info;

use super::build_resolver;
use crate::config::Config;
use crate::server;

/// Run the HTTP server until interrupted
pub fn cmd_serve(rt: &Runtime, mut config: Config, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    rt.block_on(async {
        let resolver = build_resolver(&config).await?;
        info!(
            driver = ?config.database.driver,
            cors_origin = %config.server.cors_origin,
            "Catalog resolver ready"
        );
        server::run_server(config.server.clone(), Arc::new(resolver)).await
    })
}
