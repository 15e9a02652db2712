//! `CatalogClient` - TMDB catalog API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::CatalogApi;
use super::error::{FetchError, FetchResult};
use super::types::{
    AuthenticationStatus, CatalogErrorResponse, CredentialMode, Credits, ListParams,
    MovieDetails, MovieSummary, Page, SearchParams, VideoList,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB catalog API client.
///
/// Constructed explicitly and passed by reference to whoever needs it;
/// there is no process-wide client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Static API credential.
    api_token: String,
    /// Where the credential is attached.
    credential_mode: CredentialMode,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    credential_mode: CredentialMode,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            timeout: None,
            credential_mode: CredentialMode::Header,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets where the credential is attached (default: bearer header).
    #[must_use]
    pub const fn credential_mode(mut self, mode: CredentialMode) -> Self {
        self.credential_mode = mode;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
            api_token,
            credential_mode: self.credential_mode,
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Sends a single GET request with the credential and query params attached.
    ///
    /// No retry is performed; every failure is returned to the caller.
    #[instrument(skip_all, fields(endpoint = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> FetchResult<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FetchError::network(path, format!("failed to join URL path: {e}")))?;

        let request = self.http_client.get(url).query(query);
        let request = match self.credential_mode {
            CredentialMode::Header => request.bearer_auth(&self.api_token),
            CredentialMode::Query => request.query(&[("api_key", self.api_token.as_str())]),
        };

        tracing::debug!(endpoint = path, "catalog API request");

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::network(path, describe_transport_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = match serde_json::from_str::<CatalogErrorResponse>(&body) {
                Ok(error_response) => format!(
                    "code={}, message={}",
                    error_response.status_code, error_response.status_message
                ),
                Err(_) => body,
            };
            tracing::debug!(endpoint = path, status = status.as_u16(), "catalog API error");
            return Err(FetchError::http_status(path, status.as_u16(), message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(path, describe_transport_error(&e)))?;
        serde_json::from_str(&body).map_err(|e| FetchError::decode(path, e.to_string()))
    }

    /// Fetches one page of a movie list endpoint.
    async fn get_page(&self, path: &str, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        let query = [
            ("page", params.page.to_string()),
            ("language", params.language.clone()),
        ];
        self.get_json(path, &query).await
    }
}

/// Describes a transport-level failure for the error message.
fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip_all, fields(page = params.page))]
    async fn list_popular(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.get_page("movie/popular", params).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn list_top_rated(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.get_page("movie/top_rated", params).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn list_upcoming(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.get_page("movie/upcoming", params).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn list_now_playing(&self, params: &ListParams) -> FetchResult<Page<MovieSummary>> {
        self.get_page("movie/now_playing", params).await
    }

    #[instrument(skip_all, fields(page = params.page))]
    async fn search(&self, params: &SearchParams) -> FetchResult<Page<MovieSummary>> {
        let mut query: Vec<(&str, String)> = vec![
            ("query", params.query.clone()),
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];
        if let Some(year) = params.year {
            query.push(("year", year.to_string()));
        }

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn details(&self, movie_id: u64, language: &str) -> FetchResult<MovieDetails> {
        let path = format!("movie/{movie_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn credits(&self, movie_id: u64, language: &str) -> FetchResult<Credits> {
        let path = format!("movie/{movie_id}/credits");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn videos(&self, movie_id: u64, language: &str) -> FetchResult<VideoList> {
        let path = format!("movie/{movie_id}/videos");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id, page = params.page))]
    async fn similar(
        &self,
        movie_id: u64,
        params: &ListParams,
    ) -> FetchResult<Page<MovieSummary>> {
        let path = format!("movie/{movie_id}/similar");
        self.get_page(&path, params).await
    }

    #[instrument(skip_all)]
    async fn check_credentials(&self) -> FetchResult<AuthenticationStatus> {
        self.get_json("authentication", &[]).await
    }
}
