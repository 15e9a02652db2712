//! TMDB catalog API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! and retrieves list pages, details, credits and videos.

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder};
pub use error::{FetchError, FetchErrorKind, FetchResult};
pub use types::{
    AuthenticationStatus, CastMember, Credits, CredentialMode, CrewMember, DEFAULT_LANGUAGE,
    Genre, ListParams, MovieDetails, MovieSummary, Page, SearchParams, Video, VideoList,
};
