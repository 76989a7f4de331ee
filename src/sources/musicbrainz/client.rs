//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{adapter, dto};
use crate::config::MusicBrainzConfig;
use crate::sources::domain::{
    ArtistSearchResults, ProviderError, ReleaseGroup, ReleaseGroupPage, RemoteArtist, RemoteTrack,
};

/// Largest page MusicBrainz will return
const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller asks for something out of range
const DEFAULT_PAGE_SIZE: u32 = 25;

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl MusicBrainzClient {
    /// Create a new client from configuration.
    ///
    /// Fails when no contact is configured, since MusicBrainz rejects
    /// anonymous clients.
    pub fn new(config: &MusicBrainzConfig) -> Result<Self, ProviderError> {
        let contact = config.contact.trim();
        if contact.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "musicbrainz contact is required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .user_agent(user_agent(&config.app_name, &config.app_version, contact))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            min_interval: Duration::from_millis(config.min_request_interval_ms),
            last_request: Mutex::new(None),
        })
    }

    /// Create a client for testing with custom base URL and no rate limit
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = MusicBrainzConfig {
            base_url: base_url.into(),
            min_request_interval_ms: 0,
            ..Default::default()
        };
        Self::new(&config).expect("Failed to build HTTP client")
    }

    /// Look up an artist with aliases and tags
    pub async fn lookup_artist(&self, artist_id: &str) -> Result<RemoteArtist, ProviderError> {
        let id = require("artist id", artist_id)?;
        let path = format!("artist/{}", urlencoding::encode(id));
        let response: dto::ArtistResponse = self
            .get_json(&path, &[("fmt", "json".into()), ("inc", "aliases+tags".into())])
            .await?;
        Ok(adapter::to_artist(response))
    }

    /// Look up a release group with its artist credits
    pub async fn lookup_album(&self, album_id: &str) -> Result<ReleaseGroup, ProviderError> {
        let response = self.fetch_release_group(album_id).await?;
        Ok(adapter::to_release_group(response))
    }

    /// Free-text artist search
    pub async fn search_artists(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ArtistSearchResults, ProviderError> {
        let query = require("search query", query)?;
        let response: dto::SearchResponse = self
            .get_json(
                "artist/",
                &[
                    ("query", query.to_string()),
                    ("fmt", "json".into()),
                    ("limit", clamp_limit(limit).to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;
        Ok(adapter::to_search_results(response))
    }

    /// One page of an artist's albums and EPs
    pub async fn list_artist_releases(
        &self,
        artist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<ReleaseGroupPage, ProviderError> {
        let id = require("artist id", artist_id)?;
        let response: dto::BrowseReleaseGroupsResponse = self
            .get_json(
                "release-group",
                &[
                    ("artist", id.to_string()),
                    ("fmt", "json".into()),
                    ("limit", clamp_limit(limit).to_string()),
                    ("offset", offset.to_string()),
                    ("type", "album|ep".into()),
                ],
            )
            .await?;
        Ok(adapter::to_release_group_page(response, id))
    }

    /// Track listing of the representative release of a release group.
    ///
    /// A release group without releases has no tracks.
    pub async fn list_album_tracks(&self, album_id: &str) -> Result<Vec<RemoteTrack>, ProviderError> {
        let group = self.fetch_release_group(album_id).await?;
        let Some(release) = adapter::select_representative_release(&group.releases) else {
            tracing::debug!(album_id, "Release group has no releases");
            return Ok(Vec::new());
        };

        let path = format!("release/{}", urlencoding::encode(&release.id));
        let response: dto::ReleaseResponse = self
            .get_json(&path, &[("fmt", "json".into()), ("inc", "recordings".into())])
            .await?;
        Ok(adapter::to_tracks(response))
    }

    async fn fetch_release_group(
        &self,
        album_id: &str,
    ) -> Result<dto::ReleaseGroupResponse, ProviderError> {
        let id = require("album id", album_id)?;
        let path = format!("release-group/{}", urlencoding::encode(id));
        self.get_json(&path, &[("fmt", "json".into()), ("inc", "artists+releases".into())])
            .await
    }

    /// Send the HTTP request and parse the response
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        self.wait_for_rate_limit().await;

        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "MusicBrainz request");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Prefer the structured error message when there is one
            let body = serde_json::from_str::<dto::ApiError>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(ProviderError::unexpected_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// Keep at least `min_interval` between consecutive requests
    async fn wait_for_rate_limit(&self) {
        if self.min_interval.is_zero() {
            return;
        }

        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last_request = Some(Instant::now());
    }
}

fn user_agent(app_name: &str, app_version: &str, contact: &str) -> String {
    format!("{}/{} ({})", app_name.trim(), app_version.trim(), contact)
}

fn require<'a>(what: &str, value: &'a str) -> Result<&'a str, ProviderError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::InvalidRequest(format!("{} is required", what)));
    }
    Ok(trimmed)
}

/// Zero means "use the default"; anything above the API maximum is capped
fn clamp_limit(limit: u32) -> u32 {
    match limit {
        0 => DEFAULT_PAGE_SIZE,
        l => l.min(MAX_PAGE_SIZE),
    }
}
