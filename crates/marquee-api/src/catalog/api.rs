//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::FetchResult;
use super::types::{
    AuthenticationStatus, Credits, ListParams, MovieDetails, MovieSummary, Page, SearchParams,
    VideoList,
};

/// Movie catalog API trait.
///
/// Abstracts API operations so the pager and detail loader take an injected
/// client and tests can substitute fakes.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Fetches a page of popular movies.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn list_popular(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>>;

    /// Fetches a page of top-rated movies.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn list_top_rated(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>>;

    /// Fetches a page of upcoming movies.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn list_upcoming(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>>;

    /// Fetches a page of movies now playing in theatres.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn list_now_playing(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>>;

    /// Searches for movies by title.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn search(&self, params: &SearchParams) -> FetchResult<Page<MovieSummary>>;

    /// Fetches movie details.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn details(&self, movie_id: u64, language: &str) -> FetchResult<MovieDetails>;

    /// Fetches the cast and crew of a movie.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn credits(&self, movie_id: u64, language: &str) -> FetchResult<Credits>;

    /// Fetches the videos attached to a movie.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn videos(&self, movie_id: u64, language: &str) -> FetchResult<VideoList>;

    /// Fetches a page of movies similar to the given one.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn similar(&self, movie_id: u64, params: &ListParams)
    -> FetchResult<Page<MovieSummary>>;

    /// Checks that the configured credential is accepted.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, non-2xx status, or
    /// undecodable payload.
    async fn check_credentials(&self) -> FetchResult<AuthenticationStatus>;
}
