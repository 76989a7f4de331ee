//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use liner_notes::sources::traits::BiographyApi;
//!
//! async fn describe<B: BiographyApi>(client: &B, name: &str) -> String {
//!     client.get_biography(name).await.unwrap_or_default()
//! }
//! ```

use async_trait::async_trait;

use super::domain::{
    ArtistSearchResults, ProviderError, ReleaseGroup, ReleaseGroupPage, RemoteArtist, RemoteTrack,
};
use crate::model::Review;

/// The primary metadata provider.
///
/// `ProviderError::NotFound` means the resource does not exist; every other
/// error means the provider could not answer.
#[async_trait]
pub trait MusicBrainzApi: Send + Sync {
    /// Look up an artist by ID.
    async fn lookup_artist(&self, artist_id: &str) -> Result<RemoteArtist, ProviderError>;

    /// Look up an album (release group) with its artist credits.
    async fn lookup_album(&self, album_id: &str) -> Result<ReleaseGroup, ProviderError>;

    /// Free-text artist search.
    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ArtistSearchResults, ProviderError>;

    /// One page of an artist's albums.
    async fn list_artist_releases(
        &self,
        artist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ReleaseGroupPage, ProviderError>;

    /// Ordered tracks of the album's representative release.
    async fn list_album_tracks(&self, album_id: &str) -> Result<Vec<RemoteTrack>, ProviderError>;
}

/// Free-text biography lookup by artist name.
#[async_trait]
pub trait BiographyApi: Send + Sync {
    async fn get_biography(&self, artist_name: &str) -> Result<String, ProviderError>;
}

/// Album review lookup by artist name and album title.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn get_review(&self, artist_name: &str, album_title: &str)
    -> Result<Review, ProviderError>;
}

// Implement traits for real clients

#[async_trait]
impl MusicBrainzApi for super::musicbrainz::MusicBrainzClient {
    async fn lookup_artist(&self, artist_id: &str) -> Result<RemoteArtist, ProviderError> {
        self.lookup_artist(artist_id).await
    }

    async fn lookup_album(&self, album_id: &str) -> Result<ReleaseGroup, ProviderError> {
        self.lookup_album(album_id).await
    }

    async fn search_artists(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ArtistSearchResults, ProviderError> {
        self.search_artists(query, limit, offset).await
    }

    async fn list_artist_releases(
        &self,
        artist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ReleaseGroupPage, ProviderError> {
        self.list_artist_releases(artist_id, limit, offset).await
    }

    async fn list_album_tracks(&self, album_id: &str) -> Result<Vec<RemoteTrack>, ProviderError> {
        self.list_album_tracks(album_id).await
    }
}

#[async_trait]
impl BiographyApi for super::wikipedia::WikipediaClient {
    async fn get_biography(&self, artist_name: &str) -> Result<String, ProviderError> {
        self.get_biography(artist_name).await
    }
}

#[async_trait]
impl ReviewApi for super::discogs::DiscogsClient {
    async fn get_review(
        &self,
        artist_name: &str,
        album_title: &str,
    ) -> Result<Review, ProviderError> {
        self.get_review(artist_name, album_title).await
    }
}
