//! Shared test doubles.
#![allow(clippy::unwrap_used)]
#![allow(clippy::arithmetic_side_effects)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use marquee_api::catalog::{
    AuthenticationStatus, CatalogApi, Credits, FetchError, FetchResult, ListParams, MovieDetails,
    MovieSummary, Page, SearchParams, VideoList,
};

/// Builds a minimal `MovieSummary`.
pub fn make_movie(id: u64) -> MovieSummary {
    MovieSummary {
        id,
        title: format!("Movie {id}"),
        original_title: format!("Movie {id}"),
        original_language: String::from("en"),
        overview: None,
        poster_path: None,
        backdrop_path: None,
        release_date: None,
        vote_average: 7.5,
        vote_count: 10,
        popularity: 1.0,
        genre_ids: Vec::new(),
        adult: false,
    }
}

/// Catalog fake serving `total_pages` pages of `per_page` movies each.
///
/// Movie IDs are `page * 100 + index`, so pages never overlap.
pub struct MockCatalog {
    total_pages: u32,
    per_page: u32,
    fail_pages: Mutex<HashSet<u32>>,
    requests: Mutex<Vec<(String, u32, String)>>,
    list_calls: AtomicU32,
    pub fail_details: bool,
    pub fail_credits: bool,
    pub fail_videos: bool,
    pub delay: Option<Duration>,
    pub detail_completed: AtomicBool,
}

impl MockCatalog {
    pub fn new(total_pages: u32, per_page: u32) -> Self {
        Self {
            total_pages,
            per_page,
            fail_pages: Mutex::new(HashSet::new()),
            requests: Mutex::new(Vec::new()),
            list_calls: AtomicU32::new(0),
            fail_details: false,
            fail_credits: false,
            fail_videos: false,
            delay: None,
            detail_completed: AtomicBool::new(false),
        }
    }

    /// Makes requests for `page` fail with HTTP 500 until cleared.
    pub fn fail_page(&self, page: u32) {
        self.fail_pages.lock().unwrap().insert(page);
    }

    /// Makes requests for `page` succeed again.
    pub fn heal_page(&self, page: u32) {
        self.fail_pages.lock().unwrap().remove(&page);
    }

    /// Number of list/search requests received.
    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// `(endpoint, page, language)` of every list/search request, in order.
    pub fn requests(&self) -> Vec<(String, u32, String)> {
        self.requests.lock().unwrap().clone()
    }

    fn page(&self, endpoint: &str, page: u32, language: &str) -> FetchResult<Page<MovieSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((String::from(endpoint), page, String::from(language)));

        if self.fail_pages.lock().unwrap().contains(&page) {
            return Err(FetchError::http_status(endpoint, 500, "internal error"));
        }

        let results = (0..self.per_page)
            .map(|i| make_movie(u64::from(page) * 100 + u64::from(i)))
            .collect();
        Ok(Page {
            page,
            results,
            total_pages: self.total_pages,
            total_results: self.total_pages * self.per_page,
        })
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl CatalogApi for MockCatalog {
    async fn list_popular(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.page("movie/popular", params.page, &params.language)
    }

    async fn list_top_rated(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.page("movie/top_rated", params.page, &params.language)
    }

    async fn list_upcoming(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.page("movie/upcoming", params.page, &params.language)
    }

    async fn list_now_playing(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.page("movie/now_playing", params.page, &params.language)
    }

    async fn search(&self, params: &SearchParams) -> FetchResult<Page<MovieSummary>> {
        self.page("search/movie", params.page, &params.language)
    }

    async fn details(&self, movie_id: u64, _language: &str) -> FetchResult<MovieDetails> {
        self.pause().await;
        self.detail_completed.store(true, Ordering::SeqCst);
        if self.fail_details {
            return Err(FetchError::http_status(format!("movie/{movie_id}"), 404, "not found"));
        }
        let json = include_str!("../../../fixtures/catalog/movie_details_550.json");
        Ok(serde_json::from_str(json).unwrap())
    }

    async fn credits(&self, movie_id: u64, _language: &str) -> FetchResult<Credits> {
        self.pause().await;
        if self.fail_credits {
            return Err(FetchError::network(
                format!("movie/{movie_id}/credits"),
                "connection reset",
            ));
        }
        let json = include_str!("../../../fixtures/catalog/movie_credits_550.json");
        Ok(serde_json::from_str(json).unwrap())
    }

    async fn videos(&self, movie_id: u64, _language: &str) -> FetchResult<VideoList> {
        self.pause().await;
        if self.fail_videos {
            return Err(FetchError::decode(
                format!("movie/{movie_id}/videos"),
                "missing field `results`",
            ));
        }
        let json = include_str!("../../../fixtures/catalog/movie_videos_550.json");
        Ok(serde_json::from_str(json).unwrap())
    }

    async fn similar(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> FetchResult<Page<MovieSummary>> {
        self.page(&format!("movie/{movie_id}/similar"), params.page, &params.language)
    }

    async fn check_credentials(&self) -> FetchResult<AuthenticationStatus> {
        Ok(AuthenticationStatus {
            success: true,
            status_code: Some(1),
            status_message: None,
        })
    }
}
