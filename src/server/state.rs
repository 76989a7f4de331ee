use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::ServerConfig;
use crate::resolver::CatalogResolver;

pub type SharedResolver = Arc<CatalogResolver>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub resolver: SharedResolver,
}

impl FromRef<ServerState> for SharedResolver {
    fn from_ref(input: &ServerState) -> Self {
        input.resolver.clone()
    }
}
