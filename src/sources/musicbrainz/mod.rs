//! MusicBrainz API integration
//!
//! The primary provider: artist identity, tags, release listings and track
//! listings. Its NotFound means the resource does not exist.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use client::MusicBrainzClient;
