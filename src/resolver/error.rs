//! Errors surfaced by the resolver.

use crate::db::StoreError;
use crate::sources::ProviderError;

/// Everything a caller can see go wrong during a resolution.
///
/// Secondary provider failures never show up here; they are logged and the
/// affected facet is left empty.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The primary provider says the resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// The primary provider could not answer
    #[error("upstream lookup failed: {0}")]
    Upstream(#[source] ProviderError),

    /// The cache could not be read or written
    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    /// The request itself is malformed
    #[error("{0}")]
    Validation(String),
}

impl ResolveError {
    /// Classify a primary provider failure for `entity` (`"artist"`, `"album"`)
    pub fn from_primary(entity: &str, err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound => ResolveError::NotFound(format!("{} not found", entity)),
            other => ResolveError::Upstream(other),
        }
    }
}
