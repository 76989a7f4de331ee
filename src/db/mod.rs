//! Persistence for resolved artists and albums.
//!
//! The resolver talks to storage only through the [`Repository`] trait.
//! Two engines implement it:
//! - [`MemoryStore`] keeps records in process memory
//! - [`SqliteStore`] keeps them in an embedded SQLite database via SQLx
//!
//! Records are keyed by their external (MusicBrainz) identifier. Writes are
//! idempotent upserts and every read hands out a fresh copy.
//!
//! # Example
//!
//! ```ignore
//! use liner_notes::db::{init_db, SqliteStore};
//!
//! let pool = init_db("sqlite:liner_notes.db").await?;
//! let store = SqliteStore::new(pool);
//! let artist = store.get_artist("5b11f4ce-a62d-471e-81fc-a69a8278c7da").await?;
//! ```

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::{DatabaseConfig, DatabaseDriver};
use crate::model::{Album, Artist};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "liner_notes.db";

/// Errors raised by a storage engine
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Record has no id")]
    MissingId,
}

/// Key-value persistence for artists and albums.
///
/// Unknown ids are `Ok(None)`, never an error. Saving a record with an empty
/// id fails with [`StoreError::MissingId`].
#[async_trait]
pub trait Repository: Send + Sync {
    async fn get_artist(&self, id: &str) -> Result<Option<Artist>, StoreError>;

    async fn save_artist(&self, artist: &Artist) -> Result<(), StoreError>;

    async fn get_album(&self, id: &str) -> Result<Option<Album>, StoreError>;

    async fn save_album(&self, album: &Album) -> Result<(), StoreError>;
}

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Open the storage engine selected in configuration
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn Repository>, StoreError> {
    match config.driver {
        DatabaseDriver::Memory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        DatabaseDriver::Sqlite => {
            tracing::info!(url = %config.url, "Using SQLite store");
            let pool = init_db(&config.url).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
    }
}

fn require_id(id: &str) -> Result<(), StoreError> {
    if id.trim().is_empty() {
        return Err(StoreError::MissingId);
    }
    Ok(())
}
