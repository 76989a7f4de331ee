//! JSON HTTP surface over the catalog resolver.
//!
//! | Route | Result |
//! |-------|--------|
//! | `GET /healthz` | `{"status":"ok"}` |
//! | `GET /artists/{id}` | Artist |
//! | `GET /albums/{id}` | Album |
//! | `GET /search?q=&limit=&offset=` | Artist search results |
//!
//! Failures are answered with `{"error": "<message>"}`.

mod http_layers;
mod server;
mod state;

pub use server::{make_app, run_server};
