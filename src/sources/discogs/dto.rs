//! Discogs API Data Transfer Objects
//!
//! These types match EXACTLY what the Discogs database API returns.
//! DO NOT use these types outside the discogs module - convert to domain types.
//!
//! API Reference: https://www.discogs.com/developers

use serde::{Deserialize, Serialize};

/// Database search response (`/database/search`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchItem>,
}

/// One search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchItem {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub title: String,
    pub master_id: Option<u64>,
    pub resource_url: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub style: Vec<String>,
    pub year: Option<String>,
    #[serde(default)]
    pub label: Vec<String>,
}

/// Release detail (`/releases/{id}`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub community: Community,
    /// Free-text release notes
    pub notes: Option<String>,
}

/// Artist reference inside a release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
}

/// Community statistics for a release
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Community {
    /// Users who own it
    pub have: u64,
    /// Users who want it
    pub want: u64,
    pub rating: Rating,
    pub data_quality: Option<String>,
}

/// Community rating
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Rating {
    pub count: u64,
    pub average: f64,
}

/// Error response from the Discogs API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub message: String,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
