//! Movie detail aggregation.
//!
//! A detail view needs three independent resources: the movie record, its
//! credits and its videos. [`load_movie`] fetches them concurrently and keeps
//! whatever succeeded; [`DetailTask`] runs that on the runtime and aborts it
//! when the consumer goes away.

use std::sync::Arc;

use futures::future::join3;
use marquee_api::catalog::{CatalogApi, Credits, FetchResult, MovieDetails, Video};
use tokio::task::JoinHandle;
use tracing::instrument;

/// Everything shown on a movie detail view.
///
/// Each part is `None` when its request failed; the message is kept in
/// `errors`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieBundle {
    /// Movie the bundle was loaded for.
    pub movie_id: u64,
    /// Movie record.
    pub details: Option<MovieDetails>,
    /// Cast and crew.
    pub credits: Option<Credits>,
    /// YouTube trailers, in catalog order.
    pub trailers: Option<Vec<Video>>,
    /// One message per failed part.
    pub errors: Vec<String>,
}

impl MovieBundle {
    /// Returns `true` when all three parts loaded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.details.is_some() && self.credits.is_some() && self.trailers.is_some()
    }
}

/// Keeps only trailers hosted on YouTube, preserving order.
#[must_use]
pub fn youtube_trailers(videos: Vec<Video>) -> Vec<Video> {
    videos.into_iter().filter(Video::is_youtube_trailer).collect()
}

/// Loads details, credits and videos for `movie_id` concurrently.
///
/// Never fails as a whole: a failed part is logged and left empty.
#[instrument(skip_all, fields(movie_id = movie_id))]
pub async fn load_movie<A: CatalogApi + Sync>(
    api: &A,
    movie_id: u64,
    language: &str,
) -> MovieBundle {
    let (details, credits, videos) = join3(
        api.details(movie_id, language),
        api.credits(movie_id, language),
        api.videos(movie_id, language),
    )
    .await;

    let mut errors = Vec::new();
    let details = capture(details, &mut errors);
    let credits = capture(credits, &mut errors);
    let trailers = capture(videos, &mut errors).map(|list| youtube_trailers(list.results));

    tracing::debug!(failed = errors.len(), "movie bundle loaded");
    MovieBundle {
        movie_id,
        details,
        credits,
        trailers,
        errors,
    }
}

fn capture<T>(result: FetchResult<T>, errors: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(endpoint = e.endpoint(), "{e}");
            errors.push(e.to_string());
            None
        }
    }
}

/// Handle to a [`load_movie`] running in the background.
///
/// Dropping the handle aborts the task, so a closed view never receives a
/// result.
#[derive(Debug)]
pub struct DetailTask {
    movie_id: u64,
    handle: Option<JoinHandle<MovieBundle>>,
}

impl DetailTask {
    /// Spawns detail loading for `movie_id` on the current runtime.
    pub fn spawn<A>(api: Arc<A>, movie_id: u64, language: impl Into<String>) -> Self
    where
        A: CatalogApi + Send + Sync + 'static,
    {
        let language = language.into();
        let handle =
            tokio::spawn(async move { load_movie(api.as_ref(), movie_id, &language).await });
        Self {
            movie_id,
            handle: Some(handle),
        }
    }

    /// Movie being loaded.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }

    /// Returns `true` once the task has completed or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Aborts the task. A later [`join`](Self::join) yields `None`.
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.handle {
            tracing::debug!(movie_id = self.movie_id, "detail task cancelled");
            handle.abort();
        }
    }

    /// Waits for the bundle. Returns `None` if the task was cancelled.
    pub async fn join(mut self) -> Option<MovieBundle> {
        let handle = self.handle.take()?;
        match handle.await {
            Ok(bundle) => Some(bundle),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                tracing::error!(movie_id = self.movie_id, "detail task failed: {e}");
                None
            }
        }
    }
}

impl Drop for DetailTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use super::*;
    use crate::testing::MockCatalog;

    #[tokio::test]
    async fn test_load_movie_all_parts() {
        // Arrange
        let mock = MockCatalog::new(1, 1);

        // Act
        let bundle = load_movie(&mock, 550, "en-US").await;

        // Assert
        assert!(bundle.is_complete());
        assert!(bundle.errors.is_empty());
        assert_eq!(bundle.details.unwrap().title, "Fight Club");
        assert_eq!(bundle.credits.unwrap().cast.len(), 3);
    }

    #[tokio::test]
    async fn test_trailers_filtered_in_order() {
        // Arrange
        let mock = MockCatalog::new(1, 1);

        // Act
        let bundle = load_movie(&mock, 550, "en-US").await;

        // Assert
        let keys: Vec<String> = bundle
            .trailers
            .unwrap()
            .into_iter()
            .map(|v| v.key)
            .collect();
        assert_eq!(keys, vec!["BdJKm16Co6M", "qtRKdVHc-cE"]);
        assert!(!keys.iter().any(|key| key == "dC1yHLp9bWA"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_other_parts() {
        // Arrange
        let mut mock = MockCatalog::new(1, 1);
        mock.fail_credits = true;

        // Act
        let bundle = load_movie(&mock, 550, "en-US").await;

        // Assert
        assert!(!bundle.is_complete());
        assert!(bundle.details.is_some());
        assert!(bundle.credits.is_none());
        assert!(bundle.trailers.is_some());
        assert_eq!(bundle.errors.len(), 1);
        assert!(bundle.errors.first().unwrap().contains("movie/550/credits"));
    }

    #[tokio::test]
    async fn test_every_part_failing() {
        // Arrange
        let mut mock = MockCatalog::new(1, 1);
        mock.fail_details = true;
        mock.fail_credits = true;
        mock.fail_videos = true;

        // Act
        let bundle = load_movie(&mock, 550, "en-US").await;

        // Assert
        assert_eq!(bundle.movie_id, 550);
        assert!(bundle.details.is_none());
        assert!(bundle.credits.is_none());
        assert!(bundle.trailers.is_none());
        assert_eq!(bundle.errors.len(), 3);
    }

    #[test]
    fn test_youtube_trailers_empty() {
        // Arrange & Act & Assert
        assert!(youtube_trailers(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn test_spawned_task_joins() {
        // Arrange
        let api = Arc::new(MockCatalog::new(1, 1));

        // Act
        let task = DetailTask::spawn(Arc::clone(&api), 550, "en-US");
        let bundle = task.join().await.unwrap();

        // Assert
        assert_eq!(bundle.movie_id, 550);
        assert!(bundle.is_complete());
    }

    #[tokio::test]
    async fn test_cancel_yields_none() {
        // Arrange
        let mut mock = MockCatalog::new(1, 1);
        mock.delay = Some(Duration::from_millis(200));
        let api = Arc::new(mock);
        let mut task = DetailTask::spawn(Arc::clone(&api), 550, "en-US");

        // Act
        task.cancel();
        let result = task.join().await;

        // Assert
        assert!(result.is_none());
        assert!(!api.detail_completed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_drop_aborts_request() {
        // Arrange
        let mut mock = MockCatalog::new(1, 1);
        mock.delay = Some(Duration::from_millis(100));
        let api = Arc::new(mock);
        let task = DetailTask::spawn(Arc::clone(&api), 550, "en-US");

        // Act
        drop(task);
        tokio::time::sleep(Duration::from_millis(300)).await;

        // Assert
        assert!(!api.detail_completed.load(Ordering::SeqCst));
    }
}
