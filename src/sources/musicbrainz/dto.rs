//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! MusicBrainz sends `null` for most unknown values, so nearly everything is
//! an `Option` here.

use serde::{Deserialize, Serialize};

/// Artist lookup response (`/artist/{id}?inc=aliases+tags`), also used for
/// search hits
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArtistResponse {
    /// MusicBrainz artist ID
    pub id: String,
    pub name: String,
    /// ISO country code
    pub country: Option<String>,
    /// Artist type (Person, Group, etc.)
    #[serde(rename = "type")]
    pub artist_type: Option<String>,
    pub disambiguation: Option<String>,
    #[serde(default)]
    pub aliases: Vec<Alias>,
    pub life_span: Option<LifeSpan>,
    /// Folksonomy tags with vote counts
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Search relevance (search responses only)
    pub score: Option<u32>,
}

/// Alternative artist name
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Alias {
    pub name: Option<String>,
}

/// Active period
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LifeSpan {
    pub begin: Option<String>,
    pub end: Option<String>,
    pub ended: Option<bool>,
}

/// User-submitted tag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub count: i64,
}

/// Release group lookup response (`/release-group/{id}?inc=artists+releases`)
/// and browse entries
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroupResponse {
    pub id: String,
    pub title: String,
    /// Primary type (Album, Single, EP, etc.)
    pub primary_type: Option<String>,
    /// Secondary types (Live, Compilation, etc.)
    #[serde(default)]
    pub secondary_types: Vec<String>,
    pub first_release_date: Option<String>,
    /// Releases in this group (only with `inc=releases`)
    #[serde(default)]
    pub releases: Vec<Release>,
    /// Artist credits (only with `inc=artists`)
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
}

/// Release summary inside a release group
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Release {
    pub id: String,
    pub title: String,
    /// Release status (Official, Bootleg, Promotion, etc.)
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    pub artist: Option<CreditedArtist>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
}

/// Artist inside a credit block
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreditedArtist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Artist search response (`/artist/?query=...`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub artists: Vec<ArtistResponse>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub count: u32,
}

/// Release group browse response (`/release-group?artist=...`)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BrowseReleaseGroupsResponse {
    #[serde(default)]
    pub release_groups: Vec<ReleaseGroupResponse>,
    #[serde(default)]
    pub release_group_count: u32,
    #[serde(default)]
    pub release_group_offset: u32,
}

/// Release lookup response (`/release/{id}?inc=recordings`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseResponse {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
    pub date: Option<String>,
    /// Media (discs) in this release
    #[serde(default)]
    pub media: Vec<Medium>,
}

/// Medium (disc) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Medium {
    /// Position in release (disc number)
    pub position: Option<u32>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track on a medium
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: Option<String>,
    /// Track position on medium
    pub position: Option<u32>,
    /// Track number as printed (may include disc prefix like "A1")
    pub number: Option<String>,
    pub title: Option<String>,
    /// Track length in milliseconds
    pub length: Option<i64>,
    pub recording: Option<Recording>,
}

/// Recording behind a track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Recording {
    pub id: String,
    pub title: Option<String>,
    pub length: Option<i64>,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
