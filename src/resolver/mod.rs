//! Catalog resolver - cache-first aggregation of artist and album records
//!
//! This is the high-level API behind every lookup:
//! 1. Serve from the repository when the record is cached
//! 2. Otherwise ask MusicBrainz, which decides whether the resource exists
//! 3. Fill optional facets (biography, albums, tracks, review) concurrently
//! 4. Persist the merged record and return it
//!
//! Only the primary lookup and the repository can fail a resolution.
//! Secondary facets that fail or time out are logged and left empty.
//!
//! Dropping a resolution future cancels the in-flight upstream requests and
//! produces nothing; no partial record is ever written.

mod error;
mod transform;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::config::ResolverConfig;
use crate::db::Repository;
use crate::model::{Album, Artist};
use crate::sources::{
    ArtistSearchResults, BiographyApi, MusicBrainzApi, ProviderError, ProviderKind, ReviewApi,
};

pub use error::ResolveError;

/// Search page size when the caller gives none or an out-of-range one
pub const DEFAULT_SEARCH_LIMIT: u32 = 25;

/// Largest accepted search page
pub const MAX_SEARCH_LIMIT: u32 = 100;

/// Normalized artist search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub limit: u32,
    pub offset: u32,
}

impl SearchParams {
    /// Trim the query, replace a limit outside `1..=100` with 25 and a
    /// negative offset with 0
    pub fn normalized(query: &str, limit: i64, offset: i64) -> Self {
        let limit = u32::try_from(limit)
            .ok()
            .filter(|l| (1..=MAX_SEARCH_LIMIT).contains(l))
            .unwrap_or(DEFAULT_SEARCH_LIMIT);
        let offset = u32::try_from(offset.max(0)).unwrap_or(u32::MAX);

        Self {
            query: query.trim().to_string(),
            limit,
            offset,
        }
    }
}

/// Orchestrates the repository and the three providers
pub struct CatalogResolver {
    repository: Arc<dyn Repository>,
    musicbrainz: Arc<dyn MusicBrainzApi>,
    biographies: Arc<dyn BiographyApi>,
    reviews: Arc<dyn ReviewApi>,
    upstream_timeout: Duration,
    release_page_size: u32,
}

impl CatalogResolver {
    /// Create a resolver with default deadlines and page size
    pub fn new(
        repository: Arc<dyn Repository>,
        musicbrainz: Arc<dyn MusicBrainzApi>,
        biographies: Arc<dyn BiographyApi>,
        reviews: Arc<dyn ReviewApi>,
    ) -> Self {
        let defaults = ResolverConfig::default();
        Self {
            repository,
            musicbrainz,
            biographies,
            reviews,
            upstream_timeout: Duration::from_secs(defaults.upstream_timeout_secs),
            release_page_size: defaults.release_page_size,
        }
    }

    /// Apply deadline and page size settings
    pub fn with_config(mut self, config: &ResolverConfig) -> Self {
        self.upstream_timeout = Duration::from_secs(config.upstream_timeout_secs.max(1));
        self.release_page_size = config.release_page_size;
        self
    }

    /// Override the per-call upstream deadline
    pub fn with_upstream_timeout(mut self, upstream_timeout: Duration) -> Self {
        self.upstream_timeout = upstream_timeout;
        self
    }

    /// Everything known about an artist.
    ///
    /// A cached artist is returned as stored, except that an empty album
    /// list is backfilled (and the cache updated) when the listing succeeds.
    pub async fn resolve_artist(&self, id: &str) -> Result<Artist, ResolveError> {
        let id = validate_id("artist", id)?;

        if let Some(mut cached) = self.repository.get_artist(id).await.map_err(|e| {
            tracing::error!(artist_id = id, "Artist cache read failed: {}", e);
            ResolveError::Store(e)
        })? {
            tracing::debug!(artist_id = id, "Artist cache hit");
            if cached.albums.is_empty() {
                self.backfill_albums(&mut cached).await;
            }
            return Ok(cached);
        }

        tracing::debug!(artist_id = id, "Artist cache miss, asking MusicBrainz");
        let remote = self
            .primary(self.musicbrainz.lookup_artist(id))
            .await
            .map_err(|e| ResolveError::from_primary("artist", e))?;

        let mut artist = transform::artist_from_remote(id, remote);

        let (biography, releases) = tokio::join!(
            self.secondary(
                ProviderKind::Wikipedia,
                "biography",
                self.biographies.get_biography(&artist.name),
            ),
            self.secondary(
                ProviderKind::MusicBrainz,
                "release listing",
                self.musicbrainz
                    .list_artist_releases(id, self.release_page_size, 0),
            ),
        );

        if let Some(biography) = biography {
            artist.biography = biography;
        }
        if let Some(page) = releases {
            artist.albums = transform::albums_from_page(page, &artist.name);
        }

        self.repository.save_artist(&artist).await.map_err(|e| {
            tracing::error!(artist_id = id, "Artist cache write failed: {}", e);
            ResolveError::Store(e)
        })?;

        tracing::info!(
            artist_id = id,
            albums = artist.albums.len(),
            has_biography = !artist.biography.is_empty(),
            "Resolved artist {}",
            artist.name
        );
        Ok(artist)
    }

    /// Everything known about an album.
    ///
    /// Cached albums are returned as stored and never refreshed.
    pub async fn resolve_album(&self, id: &str) -> Result<Album, ResolveError> {
        let id = validate_id("album", id)?;

        if let Some(cached) = self.repository.get_album(id).await.map_err(|e| {
            tracing::error!(album_id = id, "Album cache read failed: {}", e);
            ResolveError::Store(e)
        })? {
            tracing::debug!(album_id = id, "Album cache hit");
            return Ok(cached);
        }

        tracing::debug!(album_id = id, "Album cache miss, asking MusicBrainz");
        let group = self
            .primary(self.musicbrainz.lookup_album(id))
            .await
            .map_err(|e| ResolveError::from_primary("album", e))?;

        let mut album = transform::album_from_release_group(&group);
        album.id = id.to_string();

        let (tracks, review) = tokio::join!(
            self.secondary(
                ProviderKind::MusicBrainz,
                "track listing",
                self.musicbrainz.list_album_tracks(id),
            ),
            self.secondary(
                ProviderKind::Discogs,
                "review",
                self.reviews.get_review(&album.artist_name, &album.title),
            ),
        );

        album.tracks = tracks.map(transform::tracks_from_remote).unwrap_or_default();
        album.review = review.unwrap_or_default();

        self.repository.save_album(&album).await.map_err(|e| {
            tracing::error!(album_id = id, "Album cache write failed: {}", e);
            ResolveError::Store(e)
        })?;

        tracing::info!(
            album_id = id,
            tracks = album.tracks.len(),
            has_review = !album.review.is_empty(),
            "Resolved album {}",
            album.title
        );
        Ok(album)
    }

    /// Pass-through artist search. Results are never cached.
    pub async fn search_artists(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<ArtistSearchResults, ResolveError> {
        let params = SearchParams::normalized(query, limit, offset);
        if params.query.is_empty() {
            return Err(ResolveError::Validation(
                "search query is required".to_string(),
            ));
        }

        // Search never means "does not exist", so NotFound is an upstream failure
        self.primary(
            self.musicbrainz
                .search_artists(&params.query, params.limit, params.offset),
        )
        .await
        .map_err(ResolveError::Upstream)
    }

    /// Fill an empty album list on a cached artist. Failures are swallowed.
    async fn backfill_albums(&self, artist: &mut Artist) {
        let page = self
            .secondary(
                ProviderKind::MusicBrainz,
                "release listing",
                self.musicbrainz
                    .list_artist_releases(&artist.id, self.release_page_size, 0),
            )
            .await;

        let Some(page) = page else {
            return;
        };
        if page.release_groups.is_empty() {
            return;
        }

        artist.albums = transform::albums_from_page(page, &artist.name);
        match self.repository.save_artist(artist).await {
            Ok(()) => tracing::info!(
                artist_id = %artist.id,
                albums = artist.albums.len(),
                "Backfilled albums for cached artist"
            ),
            Err(e) => tracing::warn!(
                artist_id = %artist.id,
                "Failed to store backfilled albums: {}",
                e
            ),
        }
    }

    /// Run a primary call under the upstream deadline
    async fn primary<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        timeout(self.upstream_timeout, call)
            .await
            .unwrap_or_else(|_| {
                tracing::warn!(
                    "MusicBrainz did not answer within {:?}",
                    self.upstream_timeout
                );
                Err(ProviderError::Timeout)
            })
    }

    /// Run a secondary call under the upstream deadline, turning any failure
    /// into `None`
    async fn secondary<T>(
        &self,
        provider: ProviderKind,
        facet: &str,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Option<T> {
        match timeout(self.upstream_timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(ProviderError::NotFound)) => {
                tracing::debug!(%provider, "No {} found", facet);
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(%provider, "{} lookup failed: {}", facet, e);
                None
            }
            Err(_) => {
                tracing::warn!(%provider, "{} lookup timed out", facet);
                None
            }
        }
    }
}

fn validate_id<'a>(entity: &str, id: &'a str) -> Result<&'a str, ResolveError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::Validation(format!("{} id required", entity)));
    }
    Ok(trimmed)
}
