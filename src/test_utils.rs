//! Test utilities and fixtures for liner-notes tests.
//!
//! This module provides common test helpers, fixture factories, repository
//! wrappers and a local HTTP server to reduce boilerplate in tests.
//!
//! # Example
//!
//! ```ignore
//! use liner_notes::test_utils::{temp_db, mock_artist};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let artist = mock_artist("a1");
//!     // ... test logic
//! }
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::db::{MemoryStore, Repository, StoreError};
use crate::model::{Album, Artist, LifeSpan, Review, Track};
use crate::sources::{ArtistCredit, ReleaseGroup, RemoteArtist};

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = crate::db::db_url(Some(&db_path));

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Serve `router` on an ephemeral local port and return its base URL.
///
/// The server runs until the test's runtime shuts down.
pub async fn serve_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    format!("http://{}", addr)
}

/// Creates a mock Artist with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let artist = Artist {
///     name: "Custom".to_string(),
///     ..mock_artist("a1")
/// };
/// ```
pub fn mock_artist(id: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: "Test Artist".to_string(),
        biography: "A test artist.".to_string(),
        genres: vec!["rock".to_string()],
        country: "GB".to_string(),
        artist_type: "Group".to_string(),
        life_span: LifeSpan {
            begin: "1990".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates a mock Album with two tracks and a review.
pub fn mock_album(id: &str) -> Album {
    Album {
        id: id.to_string(),
        title: "Test Album".to_string(),
        artist_id: "a1".to_string(),
        artist_name: "Test Artist".to_string(),
        primary_type: "Album".to_string(),
        first_release_date: "1991-09-24".to_string(),
        year: 1991,
        tracks: vec![
            Track {
                number: 1,
                title: "First".to_string(),
                length: "3:30".to_string(),
            },
            Track {
                number: 2,
                title: "Second".to_string(),
                length: String::new(),
            },
        ],
        review: Review {
            source: "Discogs".to_string(),
            rating: 4.5,
            summary: "Community rating based on 10 user ratings".to_string(),
            url: "https://www.discogs.com/release/1".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates a provider-side artist.
pub fn remote_artist(id: &str, name: &str) -> RemoteArtist {
    RemoteArtist {
        id: id.to_string(),
        name: name.to_string(),
        artist_type: "Group".to_string(),
        tags: vec!["grunge".to_string()],
        ..Default::default()
    }
}

/// Creates a release group credited to one artist.
pub fn release_group(id: &str, title: &str, artist_id: &str, credited_name: &str) -> ReleaseGroup {
    ReleaseGroup {
        id: id.to_string(),
        title: title.to_string(),
        primary_type: "Album".to_string(),
        first_release_date: "1999-06-01".to_string(),
        artist_credit: vec![ArtistCredit {
            name: credited_name.to_string(),
            artist_id: artist_id.to_string(),
            artist_name: String::new(),
        }],
        ..Default::default()
    }
}

/// Memory store wrapper that counts calls and can be told to fail.
#[derive(Default)]
pub struct TestRepository {
    inner: MemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose reads fail
    pub fn failing_reads() -> Self {
        let repo = Self::default();
        repo.fail_reads.store(true, Ordering::SeqCst);
        repo
    }

    /// Repository whose writes fail
    pub fn failing_writes() -> Self {
        let repo = Self::default();
        repo.fail_writes.store(true, Ordering::SeqCst);
        repo
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), StoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for TestRepository {
    async fn get_artist(&self, id: &str) -> Result<Option<Artist>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_reads)?;
        self.inner.get_artist(id).await
    }

    async fn save_artist(&self, artist: &Artist) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_writes)?;
        self.inner.save_artist(artist).await
    }

    async fn get_album(&self, id: &str) -> Result<Option<Album>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_reads)?;
        self.inner.get_album(id).await
    }

    async fn save_album(&self, album: &Album) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check(&self.fail_writes)?;
        self.inner.save_album(album).await
    }
}
