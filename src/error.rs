//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI and `main` use `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`StoreError`], [`ProviderError`],
//!   [`ResolveError`], [`ConfigError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use liner_notes::error::{Result, ResultExt};
//!
//! async fn open(config: &DatabaseConfig) -> Result<Arc<dyn Repository>> {
//!     db::open_store(config).await.with_context("Failed to open cache store")
//! }
//! ```

use crate::config::ConfigError;
use crate::db::StoreError;
use crate::resolver::ResolveError;
use crate::sources::ProviderError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cache store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Upstream provider error
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Resolution error
    #[error("{0}")]
    Resolve(#[from] ResolveError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
