use std::collections::HashMap;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tracing::{error, info};

use super::http_layers::{cors, log_requests};
use super::state::{ServerState, SharedResolver};
use crate::config::ServerConfig;
use crate::model::{Album, Artist};
use crate::resolver::ResolveError;
use crate::sources::ArtistSearchResults;

const UPSTREAM_FAILURE: &str = "musicbrainz lookup failed";
const STORE_FAILURE: &str = "storage failure";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        // Store and upstream details stay in the log
        let (status, error) = match &self {
            ResolveError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ResolveError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ResolveError::Upstream(e) => {
                error!("Upstream failure: {}", e);
                (StatusCode::BAD_GATEWAY, UPSTREAM_FAILURE.to_string())
            }
            ResolveError::Store(e) => {
                error!("Store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, STORE_FAILURE.to_string())
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_artist(
    State(resolver): State<SharedResolver>,
    Path(id): Path<String>,
) -> Result<Json<Artist>, ResolveError> {
    resolver.resolve_artist(&id).await.map(Json)
}

async fn get_album(
    State(resolver): State<SharedResolver>,
    Path(id): Path<String>,
) -> Result<Json<Album>, ResolveError> {
    resolver.resolve_album(&id).await.map(Json)
}

/// Unparseable `limit`/`offset` values fall back to the defaults
async fn search(
    State(resolver): State<SharedResolver>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ArtistSearchResults>, ResolveError> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let limit = numeric_param(&params, "limit");
    let offset = numeric_param(&params, "offset");

    resolver.search_artists(query, limit, offset).await.map(Json)
}

fn numeric_param(params: &HashMap<String, String>, key: &str) -> i64 {
    params
        .get(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

pub fn make_app(config: ServerConfig, resolver: SharedResolver) -> Router {
    let state = ServerState { config, resolver };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/artists/{id}", get(get_artist))
        .route("/albums/{id}", get(get_album))
        .route("/search", get(search))
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig, resolver: SharedResolver) -> Result<()> {
    let address = config.address();
    let app = make_app(config, resolver);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
