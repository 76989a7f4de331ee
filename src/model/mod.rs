//! Core data models served to callers and persisted in the cache.
//!
//! Defines the primary entities: [`Artist`], [`Album`], [`Track`] and
//! [`Review`]. These are plain owned values: every read from a store hands
//! out a fresh copy, so mutating a returned record never touches the cached
//! one.
//!
//! # JSON shape
//!
//! Field names serialize in camelCase (`imageUrl`, `lifeSpan`, `artistId`,
//! `firstReleaseDate`, `coverUrl`) and empty optional fields are omitted.

use serde::{Deserialize, Serialize};

/// An artist with everything we know about them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Artist {
    /// External (MusicBrainz) identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text biography, empty when none was found
    pub biography: String,
    /// Genres ordered by relevance, deduplicated
    pub genres: Vec<String>,
    /// Albums, populated lazily and without tracks or review
    pub albums: Vec<Album>,
    /// Related artist identifiers
    pub related: Vec<String>,
    pub image_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub artist_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub disambiguation: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub life_span: LifeSpan,
}

/// Active period of an artist.
///
/// `ended == true` with an empty `end` means the artist ended at an unknown date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeSpan {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub begin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub ended: bool,
}

/// An album (MusicBrainz release group).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Album {
    pub id: String,
    pub title: String,
    /// Identifier of the primary credited artist
    pub artist_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artist_name: String,
    /// Primary type (Album, EP, Single, ...)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub primary_type: String,
    /// Secondary types (Live, Compilation, ...)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_types: Vec<String>,
    /// First release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub first_release_date: String,
    /// Year derived from `first_release_date`, 0 if unknown
    pub year: i32,
    pub genre: String,
    pub label: String,
    /// Ordered track listing
    pub tracks: Vec<Track>,
    pub review: Review,
    pub cover_url: String,
}

/// A track on an album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// 1-based position within the album
    pub number: u32,
    pub title: String,
    /// Formatted as `M:SS`, empty when the duration is unknown
    pub length: String,
}

/// A review of an album.
///
/// The all-empty value means "no review found". A zero rating cannot be told
/// apart from a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub source: String,
    pub author: String,
    pub rating: f64,
    pub summary: String,
    pub text: String,
    pub url: String,
}

impl Review {
    /// True when no review data was found.
    pub fn is_empty(&self) -> bool {
        *self == Review::default()
    }
}

/// Format a millisecond duration as `M:SS`.
///
/// Absent or non-positive durations yield an empty string, never `"0:00"`.
pub fn format_track_length(length_ms: Option<i64>) -> String {
    match length_ms {
        Some(ms) if ms > 0 => {
            let minutes = ms / 60_000;
            let seconds = (ms / 1000) % 60;
            format!("{}:{:02}", minutes, seconds)
        }
        _ => String::new(),
    }
}

/// Parse the release year from a (possibly partial) ISO date.
///
/// Returns 0 for dates shorter than four characters or with a non-numeric year.
pub fn release_year(date: &str) -> i32 {
    date.get(..4)
        .and_then(|year| year.parse().ok())
        .unwrap_or(0)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn track_length_without_duration_is_empty(ms in proptest::option::of(-10_000_000i64..=0)) {
            prop_assert_eq!(format_track_length(ms), "");
        }

        #[test]
        fn track_length_seconds_are_two_digits(ms in 1i64..100_000_000) {
            let formatted = format_track_length(Some(ms));
            let (_, seconds) = formatted.split_once(':').unwrap();
            prop_assert_eq!(seconds.len(), 2);
            prop_assert!(seconds.parse::<u32>().unwrap() < 60);
        }

        #[test]
        fn release_year_reads_leading_digits(year in 1000i32..9999, rest in "(-[0-9]{2}){0,2}") {
            let date = format!("{}{}", year, rest);
            prop_assert_eq!(release_year(&date), year);
        }
    }
}
