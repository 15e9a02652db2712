//! Paginated movie list driver.
#![allow(clippy::future_not_send)]

use marquee_api::catalog::{DEFAULT_LANGUAGE, LocalCatalogApi, MovieSummary};
use tracing::instrument;

use crate::source::{ListSource, fetch_page};
use crate::state::{ListState, PageRequest};

/// Drives a [`ListState`] against a catalog client.
///
/// Each operation returns `true` when a request was issued. Failures never
/// surface as errors; they land in the state as a message.
#[derive(Debug)]
pub struct Pager<'a, A> {
    api: &'a A,
    language: String,
    state: ListState<MovieSummary>,
}

impl<'a, A: LocalCatalogApi> Pager<'a, A> {
    /// Creates an idle pager requesting `en-US` results.
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            language: String::from(DEFAULT_LANGUAGE),
            state: ListState::new(),
        }
    }

    /// Sets the response language used for subsequent requests.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Changes the response language used for subsequent requests.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Loads page 1 of `source`.
    pub async fn start(&mut self, source: ListSource) -> bool {
        let request = self.state.begin_start(source);
        self.run(request).await
    }

    /// Loads the next page of the current source.
    pub async fn load_more(&mut self) -> bool {
        let request = self.state.begin_load_more();
        self.run(request).await
    }

    /// Re-fetches page 1, replacing the items on success.
    pub async fn refresh(&mut self) -> bool {
        let request = self.state.begin_refresh();
        self.run(request).await
    }

    /// Re-fetches page 1 of the current source after a failure.
    pub async fn retry(&mut self) -> bool {
        let request = self.state.begin_retry();
        self.run(request).await
    }

    /// Drops items and source.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Underlying list state.
    #[must_use]
    pub const fn state(&self) -> &ListState<MovieSummary> {
        &self.state
    }

    #[instrument(skip_all)]
    async fn run(&mut self, request: Option<PageRequest>) -> bool {
        let Some(request) = request else {
            tracing::debug!("request skipped");
            return false;
        };

        tracing::debug!(
            source = %request.source(),
            page = request.page(),
            kind = ?request.kind(),
            "fetching page"
        );
        let result = fetch_page(self.api, request.source(), request.page(), &self.language).await;
        if let Err(e) = &result {
            tracing::warn!(source = %request.source(), page = request.page(), "{e}");
        }
        if !self.state.finish(&request, result) {
            tracing::debug!(page = request.page(), "stale response discarded");
        }
        true
    }
}
