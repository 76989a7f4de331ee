//! Discogs HTTP client
//!
//! Searches the Discogs database for a release and turns the best hit into a
//! review. Authenticates with a personal token when one is configured,
//! otherwise with consumer key/secret query parameters, otherwise anonymously
//! (with much lower rate limits).

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::{adapter, dto};
use crate::config::DiscogsConfig;
use crate::model::Review;
use crate::sources::domain::ProviderError;

/// Search hits considered per lookup
const SEARCH_PAGE_SIZE: &str = "5";

/// Discogs API client
pub struct DiscogsClient {
    http_client: reqwest::Client,
    base_url: String,
    /// `key`/`secret` query parameters, used only without a token
    consumer_credentials: Option<(String, String)>,
}

impl DiscogsClient {
    /// Create a new client from configuration
    pub fn new(config: &DiscogsConfig) -> Result<Self, ProviderError> {
        let token = non_empty(config.token.as_deref());

        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Discogs token={}", token))
                .map_err(|e| ProviderError::InvalidRequest(format!("invalid discogs token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let consumer_credentials = match (
            token,
            non_empty(config.consumer_key.as_deref()),
            non_empty(config.consumer_secret.as_deref()),
        ) {
            (None, Some(key), Some(secret)) => Some((key.to_string(), secret.to_string())),
            _ => None,
        };

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.trim())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            consumer_credentials,
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = DiscogsConfig {
            base_url: base_url.into(),
            ..Default::default()
        };
        Self::new(&config).expect("Failed to build HTTP client")
    }

    /// Review for an album, taken from the first matching release.
    ///
    /// No search hits is NotFound.
    pub async fn get_review(&self, artist_name: &str, album_title: &str) -> Result<Review, ProviderError> {
        let query = format!("{} {}", artist_name.trim(), album_title.trim());
        let query = query.trim();
        if query.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "artist or title is required".to_string(),
            ));
        }

        let search: dto::SearchResponse = self
            .get_json(
                "database/search",
                &[
                    ("q", query.to_string()),
                    ("type", "release".to_string()),
                    ("per_page", SEARCH_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        let Some(best) = search.results.first() else {
            return Err(ProviderError::NotFound);
        };

        let release: dto::Release = self.get_json(&format!("releases/{}", best.id), &[]).await?;
        Ok(adapter::to_review(release))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "Discogs request");

        let mut request = self.http_client.get(&url).query(query);
        if let Some((key, secret)) = &self.consumer_credentials {
            request = request.query(&[("key", key), ("secret", secret)]);
        }

        let response = request.send().await.map_err(ProviderError::from_transport)?;

        let status = response.status();
        match status {
            reqwest::StatusCode::NOT_FOUND => return Err(ProviderError::NotFound),
            reqwest::StatusCode::TOO_MANY_REQUESTS => return Err(ProviderError::RateLimited),
            reqwest::StatusCode::UNAUTHORIZED => return Err(ProviderError::Unauthorized),
            _ => {}
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<dto::ApiError>(&text)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(ProviderError::unexpected_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
