//! Building served records out of provider data.

use std::collections::HashSet;

use crate::model::{Album, Artist, Track};
use crate::sources::{ReleaseGroup, ReleaseGroupPage, RemoteArtist, RemoteTrack};

/// Base artist from the primary provider: identity, genres, aliases and
/// life span. Biography and albums are filled in later.
pub fn artist_from_remote(id: &str, remote: RemoteArtist) -> Artist {
    Artist {
        id: id.to_string(),
        name: remote.name,
        genres: remote.tags,
        country: remote.country,
        artist_type: remote.artist_type,
        disambiguation: remote.disambiguation,
        aliases: remote.aliases,
        life_span: remote.life_span,
        ..Default::default()
    }
}

/// Base album from a release group, without tracks or review
pub fn album_from_release_group(group: &ReleaseGroup) -> Album {
    Album {
        id: group.id.clone(),
        title: group.title.clone(),
        artist_id: group.primary_artist_id().to_string(),
        artist_name: group.primary_artist_name().to_string(),
        primary_type: group.primary_type.clone(),
        secondary_types: group.secondary_types.clone(),
        first_release_date: group.first_release_date.clone(),
        year: group.release_year(),
        ..Default::default()
    }
}

/// Album summaries for an artist's page of release groups.
///
/// Listings carry no credited names, so the artist's own name fills in.
pub fn albums_from_page(page: ReleaseGroupPage, artist_name: &str) -> Vec<Album> {
    page.release_groups
        .iter()
        .map(|group| {
            let mut album = album_from_release_group(group);
            if album.artist_name.is_empty() {
                album.artist_name = artist_name.to_string();
            }
            album
        })
        .collect()
}

/// Served track list.
///
/// Provider numbers are kept when they already run uniquely from 1;
/// otherwise (several discs, missing positions) tracks are renumbered in
/// listing order.
pub fn tracks_from_remote(remote: Vec<RemoteTrack>) -> Vec<Track> {
    let mut seen = HashSet::new();
    let keep_numbers = remote.iter().all(|t| t.number > 0 && seen.insert(t.number));

    remote
        .into_iter()
        .enumerate()
        .map(|(index, track)| Track {
            number: if keep_numbers {
                track.number
            } else {
                index as u32 + 1
            },
            title: track.title,
            length: track.length,
        })
        .collect()
}
