//! Wikipedia HTTP client
//!
//! Fetches page summaries and walks a few title variants until one
//! describes the artist.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use super::{adapter, dto};
use crate::config::WikipediaConfig;
use crate::sources::domain::ProviderError;

/// Wikipedia REST API client
pub struct WikipediaClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl WikipediaClient {
    /// Create a new client from configuration
    pub fn new(config: &WikipediaConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.trim())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let config = WikipediaConfig {
            base_url: base_url.into(),
            ..Default::default()
        };
        Self::new(&config).expect("Failed to build HTTP client")
    }

    /// Cleaned biography for an artist.
    ///
    /// Tries the bare name, then the "(band)", "(musician)" and "(singer)"
    /// variants. Only NotFound moves on to the next variant; any other
    /// failure ends the walk.
    pub async fn get_biography(&self, artist_name: &str) -> Result<String, ProviderError> {
        let name = artist_name.trim();
        if name.is_empty() {
            return Err(ProviderError::InvalidRequest(
                "artist name is required".to_string(),
            ));
        }

        for title in adapter::title_variants(name) {
            match self.fetch_summary(&title).await {
                Ok(summary) if !summary.extract.trim().is_empty() => {
                    tracing::debug!(%title, "Found Wikipedia summary");
                    return Ok(adapter::clean_extract(&summary.extract));
                }
                Ok(_) | Err(ProviderError::NotFound) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(ProviderError::NotFound)
    }

    /// Fetch one page summary. Disambiguation pages count as NotFound.
    async fn fetch_summary(&self, title: &str) -> Result<dto::SummaryResponse, ProviderError> {
        let url = format!("{}/page/summary/{}", self.base_url, urlencoding::encode(title));

        let response = self
            .http_client
            .get(&url)
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
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::unexpected_status(status.as_u16(), &body));
        }

        let summary = response
            .json::<dto::SummaryResponse>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        if adapter::is_disambiguation(&summary) {
            return Err(ProviderError::NotFound);
        }

        Ok(summary)
    }
}
