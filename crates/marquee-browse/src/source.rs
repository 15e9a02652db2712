//! List sources and page fetching.
#![allow(clippy::future_not_send)]

use std::fmt;
use std::str::FromStr;

use marquee_api::catalog::{
    FetchResult, ListParams, LocalCatalogApi, MovieSummary, Page, SearchParams,
};

/// Curated movie list offered by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieCategory {
    /// `movie/popular`.
    Popular,
    /// `movie/top_rated`.
    TopRated,
    /// `movie/upcoming`.
    Upcoming,
    /// `movie/now_playing`.
    NowPlaying,
}

impl MovieCategory {
    /// Every category, in menu order.
    pub const ALL: [Self; 4] = [Self::Popular, Self::TopRated, Self::Upcoming, Self::NowPlaying];

    /// Snake-case name (matches the endpoint suffix).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now_playing",
        }
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category: {} (expected popular, top_rated, upcoming or now_playing)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for MovieCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| UnknownCategory(String::from(s)))
    }
}

/// What a pager lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListSource {
    /// A curated category.
    Category(MovieCategory),
    /// Title search results for the query.
    Search(String),
}

impl fmt::Display for ListSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::Search(query) => write!(f, "search \"{query}\""),
        }
    }
}

impl From<MovieCategory> for ListSource {
    fn from(category: MovieCategory) -> Self {
        Self::Category(category)
    }
}

/// Fetches one page of `source` in the given language.
///
/// # Errors
///
/// Returns the client's `FetchError` unchanged.
pub async fn fetch_page<A: LocalCatalogApi>(
    api: &A,
    source: &ListSource,
    page: u32,
    language: &str,
) -> FetchResult<Page<MovieSummary>> {
    match source {
        ListSource::Category(category) => {
            let params = ListParams::page(page).language(language);
            match category {
                MovieCategory::Popular => api.list_popular(&params).await,
                MovieCategory::TopRated => api.list_top_rated(&params).await,
                MovieCategory::Upcoming => api.list_upcoming(&params).await,
                MovieCategory::NowPlaying => api.list_now_playing(&params).await,
            }
        }
        ListSource::Search(query) => {
            let params = SearchParams::new(query.as_str())
                .language(language)
                .page(page);
            api.search(&params).await
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::testing::MockCatalog;

    #[test]
    fn test_category_from_str() {
        // Arrange & Act & Assert
        assert_eq!(
            "top_rated".parse::<MovieCategory>().unwrap(),
            MovieCategory::TopRated
        );
        assert_eq!(
            "now-playing".parse::<MovieCategory>().unwrap(),
            MovieCategory::NowPlaying
        );
        assert!("trending".parse::<MovieCategory>().is_err());
    }

    #[test]
    fn test_list_source_display() {
        // Arrange & Act & Assert
        assert_eq!(
            ListSource::from(MovieCategory::Upcoming).to_string(),
            "upcoming"
        );
        assert_eq!(
            ListSource::Search(String::from("Dune")).to_string(),
            "search \"Dune\""
        );
    }

    #[tokio::test]
    async fn test_fetch_page_routes_each_source() {
        // Arrange
        let mock = MockCatalog::new(3, 2);
        let sources = [
            ListSource::Category(MovieCategory::Popular),
            ListSource::Category(MovieCategory::TopRated),
            ListSource::Category(MovieCategory::Upcoming),
            ListSource::Category(MovieCategory::NowPlaying),
            ListSource::Search(String::from("Dune")),
        ];

        // Act
        for source in &sources {
            fetch_page(&mock, source, 2, "ru-RU").await.unwrap();
        }

        // Assert
        assert_eq!(
            mock.requests(),
            vec![
                (String::from("movie/popular"), 2, String::from("ru-RU")),
                (String::from("movie/top_rated"), 2, String::from("ru-RU")),
                (String::from("movie/upcoming"), 2, String::from("ru-RU")),
                (String::from("movie/now_playing"), 2, String::from("ru-RU")),
                (String::from("search/movie"), 2, String::from("ru-RU")),
            ]
        );
    }
}
