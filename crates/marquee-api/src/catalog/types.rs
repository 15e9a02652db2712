//! Catalog API response types and request parameters.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default response language sent to the catalog.
pub const DEFAULT_LANGUAGE: &str = "en-US";

// --- Pages ---

/// One page of a paginated list response (`movie/popular`, `search/movie`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Current page number (1-based).
    pub page: u32,
    /// Results on this page.
    pub results: Vec<T>,
    /// Total number of pages reported by the server.
    pub total_pages: u32,
    /// Total number of results reported by the server.
    pub total_results: u32,
}

impl<T> Page<T> {
    /// Returns `true` if the server reports pages after this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

// --- Movie summary ---

/// A movie as it appears in list and search results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, empty string or null when unknown).
    pub release_date: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

impl MovieSummary {
    /// Returns the release year, if the release date is a valid date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

/// Parses the year out of a `YYYY-MM-DD` release date.
fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

// --- Movie details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: String,
    /// Overview text.
    pub overview: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Status (e.g., "Released", "Post Production").
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Budget in USD (0 when unknown).
    #[serde(default)]
    pub budget: u64,
    /// Revenue in USD (0 when unknown).
    #[serde(default)]
    pub revenue: u64,
    /// Official homepage.
    pub homepage: Option<String>,
    /// IMDb identifier.
    pub imdb_id: Option<String>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

impl MovieDetails {
    /// Returns the release year, if the release date is a valid date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }

    /// Returns the genre names joined with `", "`.
    #[must_use]
    pub fn genre_names(&self) -> String {
        self.genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Credits ---

/// Response from `movie/{movie_id}/credits` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credits {
    /// TMDB movie ID.
    pub id: u64,
    /// Cast members.
    #[serde(default)]
    pub cast: Vec<CastMember>,
    /// Crew members.
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Returns up to `n` cast members in billing order.
    #[must_use]
    pub fn top_billed(&self, n: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order);
        cast.truncate(n);
        cast
    }

    /// Returns the crew members credited with the given job (e.g. "Director").
    pub fn crew_with_job<'a>(&'a self, job: &'a str) -> impl Iterator<Item = &'a CrewMember> {
        self.crew.iter().filter(move |c| c.job == job)
    }
}

/// A single cast member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Character played.
    pub character: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Billing order (0 = top billed).
    #[serde(default)]
    pub order: u32,
}

/// A single crew member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrewMember {
    /// TMDB person ID.
    pub id: u64,
    /// Person name.
    pub name: String,
    /// Job title (e.g., "Director").
    #[serde(default)]
    pub job: String,
    /// Department (e.g., "Directing").
    #[serde(default)]
    pub department: String,
    /// Profile image path.
    pub profile_path: Option<String>,
}

// --- Videos ---

/// Response from `movie/{movie_id}/videos` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoList {
    /// TMDB movie ID.
    pub id: u64,
    /// Videos attached to the movie.
    #[serde(default)]
    pub results: Vec<Video>,
}

/// A single video entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// TMDB video ID.
    pub id: String,
    /// Video name.
    pub name: String,
    /// Key on the hosting site (YouTube video ID).
    pub key: String,
    /// Hosting site (e.g., "YouTube", "Vimeo").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser", "Clip").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Official upload flag.
    #[serde(default)]
    pub official: bool,
    /// Language (ISO 639-1).
    #[serde(default)]
    pub iso_639_1: Option<String>,
}

impl Video {
    /// Returns `true` for trailers hosted on YouTube.
    #[must_use]
    pub fn is_youtube_trailer(&self) -> bool {
        self.video_type == "Trailer" && self.site == "YouTube"
    }

    /// Returns the YouTube watch URL for this video.
    #[must_use]
    pub fn youtube_watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }

    /// Returns the YouTube embed URL for this video.
    #[must_use]
    pub fn youtube_embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.key)
    }
}

// --- Authentication ---

/// Response from `authentication` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticationStatus {
    /// Whether the credential was accepted.
    pub success: bool,
    /// TMDB status code.
    pub status_code: Option<u32>,
    /// TMDB status message.
    pub status_message: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Request Parameters ---

/// Where the static API credential is attached to each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// `Authorization: Bearer <token>` header.
    #[default]
    Header,
    /// `api_key=<token>` query parameter.
    Query,
}

/// Parameters for the list endpoints (`movie/popular`, `movie/{id}/similar`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Response language (default: "en-US").
    pub language: String,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            language: String::from(DEFAULT_LANGUAGE),
        }
    }
}

impl ListParams {
    /// Creates list params for the given page.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by release year.
    pub year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
            year: None,
            include_adult: false,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}
