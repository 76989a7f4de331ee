//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where MusicBrainz DTO types are converted to domain
//! types. If MusicBrainz changes their response format, only this file and
//! dto.rs need to change.

use std::collections::HashSet;

use super::dto;
use crate::model::{LifeSpan, format_track_length};
use crate::sources::domain::{
    ArtistCredit, ArtistSearchResults, ReleaseGroup, ReleaseGroupPage, RemoteArtist, RemoteTrack,
};

/// Convert an artist lookup (or search hit) into a RemoteArtist
pub fn to_artist(response: dto::ArtistResponse) -> RemoteArtist {
    let aliases = response
        .aliases
        .into_iter()
        .filter_map(|a| a.name)
        .filter(|name| !name.is_empty())
        .collect();

    RemoteArtist {
        id: response.id,
        name: response.name,
        country: response.country.unwrap_or_default(),
        artist_type: response.artist_type.unwrap_or_default(),
        disambiguation: response.disambiguation.unwrap_or_default(),
        aliases,
        life_span: to_life_span(response.life_span),
        tags: extract_genres(&response.tags),
    }
}

fn to_life_span(span: Option<dto::LifeSpan>) -> LifeSpan {
    let Some(span) = span else {
        return LifeSpan::default();
    };
    LifeSpan {
        begin: span.begin.unwrap_or_default(),
        end: span.end.unwrap_or_default(),
        ended: span.ended.unwrap_or(false),
    }
}

/// Tag names sorted by vote count (most popular first), deduplicated
/// case-insensitively. Tags without positive votes are dropped.
fn extract_genres(tags: &[dto::Tag]) -> Vec<String> {
    let mut sorted: Vec<_> = tags.iter().filter(|t| t.count > 0).collect();
    // stable sort keeps API order for ties
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .map(|t| t.name.trim())
        .filter(|name| !name.is_empty() && seen.insert(name.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Convert a release group lookup into a ReleaseGroup
pub fn to_release_group(response: dto::ReleaseGroupResponse) -> ReleaseGroup {
    let artist_credit = response
        .artist_credit
        .into_iter()
        .map(|credit| {
            let artist = credit.artist.unwrap_or(dto::CreditedArtist {
                id: String::new(),
                name: String::new(),
            });
            ArtistCredit {
                name: credit.name.unwrap_or_default(),
                artist_id: artist.id,
                artist_name: artist.name,
            }
        })
        .collect();

    ReleaseGroup {
        id: response.id,
        title: response.title,
        primary_type: response.primary_type.unwrap_or_default(),
        secondary_types: response.secondary_types,
        first_release_date: response.first_release_date.unwrap_or_default(),
        artist_credit,
    }
}

/// Convert an artist's release group listing.
///
/// Browse entries carry no credits, so each group is credited to the artist
/// that was browsed.
pub fn to_release_group_page(
    response: dto::BrowseReleaseGroupsResponse,
    artist_id: &str,
) -> ReleaseGroupPage {
    let release_groups = response
        .release_groups
        .into_iter()
        .map(|item| {
            let mut group = to_release_group(item);
            group.artist_credit = vec![ArtistCredit {
                artist_id: artist_id.to_string(),
                ..Default::default()
            }];
            group
        })
        .collect();

    ReleaseGroupPage {
        release_groups,
        count: response.release_group_count,
        offset: response.release_group_offset,
    }
}

/// Convert an artist search response
pub fn to_search_results(response: dto::SearchResponse) -> ArtistSearchResults {
    ArtistSearchResults {
        artists: response.artists.into_iter().map(to_artist).collect(),
        offset: response.offset,
        count: response.count,
    }
}

/// Pick the release used for track listings.
///
/// The first release with status exactly "Official" wins; otherwise the first
/// release returned.
pub fn select_representative_release(releases: &[dto::Release]) -> Option<&dto::Release> {
    releases
        .iter()
        .find(|r| r.status.as_deref() == Some("Official"))
        .or_else(|| releases.first())
}

/// Flatten every medium of a release into one ordered track list
pub fn to_tracks(response: dto::ReleaseResponse) -> Vec<RemoteTrack> {
    response
        .media
        .into_iter()
        .flat_map(|medium| medium.tracks)
        .map(|track| {
            let number = track
                .position
                .filter(|p| *p > 0)
                .or_else(|| track.number.as_deref().and_then(|n| n.trim().parse().ok()))
                .unwrap_or(0);

            let recording = track.recording;
            let title = track
                .title
                .or_else(|| recording.as_ref().and_then(|r| r.title.clone()))
                .unwrap_or_default();

            RemoteTrack {
                number,
                title,
                length: format_track_length(track.length),
                recording_id: recording.map(|r| r.id).unwrap_or_default(),
            }
        })
        .collect()
}
