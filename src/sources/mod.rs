//! External metadata providers.
//!
//! # Architecture
//!
//! Each provider follows the same split:
//! - **Domain models** (`domain.rs`) - Internal types that represent what we need
//! - **API DTOs** (`*/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for the external APIs
//!
//! The resolver only sees the traits in [`traits`], so tests can swap every
//! provider for a mock.
//!
//! | Provider | Facet |
//! |---|---|
//! | MusicBrainz | identity, tags, release and track listings |
//! | Wikipedia | biography |
//! | Discogs | review |

pub mod discogs;
pub mod domain;
pub mod musicbrainz;
pub mod traits;
pub mod wikipedia;

pub use discogs::DiscogsClient;
pub use domain::{
    ArtistCredit, ArtistSearchResults, ProviderError, ProviderKind, ReleaseGroup,
    ReleaseGroupPage, RemoteArtist, RemoteTrack,
};
pub use musicbrainz::MusicBrainzClient;
pub use traits::{BiographyApi, MusicBrainzApi, ReviewApi};
pub use wikipedia::WikipediaClient;
