//! Internal domain models for provider responses.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

use serde::Serialize;

use crate::model::{LifeSpan, release_year};

/// Artist as reported by the primary metadata provider
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteArtist {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub artist_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disambiguation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub life_span: LifeSpan,
    /// Tag names ordered by vote count, most popular first
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A contributing artist on a release group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistCredit {
    /// How the artist is credited on this release
    pub name: String,
    pub artist_id: String,
    /// Official artist name
    pub artist_name: String,
}

impl ArtistCredit {
    /// Official name if known, otherwise the credited name
    pub fn display_name(&self) -> &str {
        if self.artist_name.is_empty() {
            &self.name
        } else {
            &self.artist_name
        }
    }
}

/// An album (release group) as reported by the primary provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseGroup {
    pub id: String,
    pub title: String,
    pub primary_type: String,
    pub secondary_types: Vec<String>,
    pub first_release_date: String,
    pub artist_credit: Vec<ArtistCredit>,
}

impl ReleaseGroup {
    /// The credit that represents the album's artist.
    ///
    /// The first credit carrying an artist ID wins; without any ID the first
    /// credit is used.
    fn primary_credit(&self) -> Option<&ArtistCredit> {
        self.artist_credit
            .iter()
            .find(|c| !c.artist_id.is_empty())
            .or_else(|| self.artist_credit.first())
    }

    /// ID of the first credited artist, empty if no credit has one
    pub fn primary_artist_id(&self) -> &str {
        self.primary_credit()
            .map(|c| c.artist_id.as_str())
            .unwrap_or("")
    }

    /// Display name of the primary credited artist
    pub fn primary_artist_name(&self) -> &str {
        self.primary_credit()
            .map(ArtistCredit::display_name)
            .unwrap_or("")
    }

    /// Year of the first release, 0 if unknown
    pub fn release_year(&self) -> i32 {
        release_year(&self.first_release_date)
    }
}

/// One page of an artist's release groups
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseGroupPage {
    pub release_groups: Vec<ReleaseGroup>,
    pub count: u32,
    pub offset: u32,
}

/// Artist search results, passed through to callers uncached
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtistSearchResults {
    pub artists: Vec<RemoteArtist>,
    pub offset: u32,
    pub count: u32,
}

/// A track on the representative release of an album
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteTrack {
    /// 1-based position
    pub number: u32,
    pub title: String,
    /// Formatted `M:SS`, empty when unknown
    pub length: String,
    pub recording_id: String,
}

/// Which external service a piece of data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    MusicBrainz,
    Wikipedia,
    Discogs,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderKind::MusicBrainz => "musicbrainz",
            ProviderKind::Wikipedia => "wikipedia",
            ProviderKind::Discogs => "discogs",
        };
        f.write_str(name)
    }
}

/// Errors that can occur talking to an external provider
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Resource not found")]
    NotFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Unexpected status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Error bodies are cut to this many bytes
const MAX_ERROR_BODY: usize = 512;

impl ProviderError {
    /// Error for a non-success status, keeping at most 512 bytes of the body
    pub fn unexpected_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let mut end = body.len().min(MAX_ERROR_BODY);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        ProviderError::ApiError {
            status,
            body: body[..end].to_string(),
        }
    }

    /// Classify a transport-level reqwest failure
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::Network(err.to_string())
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(name: &str, artist_id: &str, artist_name: &str) -> ArtistCredit {
        ArtistCredit {
            name: name.to_string(),
            artist_id: artist_id.to_string(),
            artist_name: artist_name.to_string(),
        }
    }

    #[test]
    fn test_primary_artist_uses_credited_name_when_artist_name_missing() {
        let group = ReleaseGroup {
            title: "Nevermind".to_string(),
            first_release_date: "1999-06-01".to_string(),
            artist_credit: vec![credit("Remote Artist", "artist-1", "")],
            ..Default::default()
        };

        assert_eq!(group.primary_artist_id(), "artist-1");
        assert_eq!(group.primary_artist_name(), "Remote Artist");
        assert_eq!(group.release_year(), 1999);
    }

    #[test]
    fn test_primary_artist_skips_credits_without_id() {
        let group = ReleaseGroup {
            artist_credit: vec![
                credit("Various", "", ""),
                credit("Queen", "queen-id", "Queen"),
            ],
            ..Default::default()
        };

        assert_eq!(group.primary_artist_id(), "queen-id");
        assert_eq!(group.primary_artist_name(), "Queen");
    }

    #[test]
    fn test_primary_artist_falls_back_to_first_credit_name() {
        let group = ReleaseGroup {
            artist_credit: vec![credit("Various Artists", "", ""), credit("Other", "", "")],
            ..Default::default()
        };

        assert_eq!(group.primary_artist_id(), "");
        assert_eq!(group.primary_artist_name(), "Various Artists");
    }

    #[test]
    fn test_no_credits() {
        let group = ReleaseGroup::default();
        assert_eq!(group.primary_artist_id(), "");
        assert_eq!(group.primary_artist_name(), "");
        assert_eq!(group.release_year(), 0);
    }

    #[test]
    fn test_unexpected_status_truncates_on_char_boundary() {
        let long = "é".repeat(400);
        match ProviderError::unexpected_status(500, &long) {
            ProviderError::ApiError { status, body } => {
                assert_eq!(status, 500);
                assert!(body.len() <= MAX_ERROR_BODY);
                assert!(long.starts_with(&body));
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert_eq!(
            ProviderError::unexpected_status(502, "  bad gateway \n"),
            ProviderError::ApiError {
                status: 502,
                body: "bad gateway".to_string()
            }
        );
    }

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ProviderKind::MusicBrainz.to_string(), "musicbrainz");
        assert_eq!(ProviderKind::Discogs.to_string(), "discogs");
    }
}
