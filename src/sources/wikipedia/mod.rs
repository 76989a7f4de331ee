//! Wikipedia integration
//!
//! Supplies artist biographies from the REST `page/summary` endpoint.

pub mod dto;
mod adapter;
mod client;

pub use client::WikipediaClient;
