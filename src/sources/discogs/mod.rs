//! Discogs integration
//!
//! Supplies album reviews built from Discogs community data: the average
//! rating, release notes, and collection counts.
//!
//! API docs: https://www.discogs.com/developers

pub mod dto;
mod adapter;
mod client;

pub use client::DiscogsClient;
