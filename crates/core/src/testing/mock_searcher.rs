//! Mock searcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::context::ScrapeContext;
use crate::media::MediaDescriptor;
use crate::searcher::{IndexerResult, SearchError, Searcher};

/// Mock implementation of the Searcher trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable best result
/// - Track searched descriptors for assertions
/// - Simulate failures
///
/// # Example
///
/// ```rust,ignore
/// use scout_core::testing::{MockSearcher, fixtures};
///
/// let searcher = MockSearcher::new();
/// searcher.set_result(fixtures::indexer_result("Example.2020.1080p", 80, 500_000_000)).await;
///
/// let best = searcher.search(&ctx, &media).await?;
/// assert_eq!(best.seeders, 80);
///
/// let searches = searcher.recorded_searches().await;
/// assert_eq!(searches.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSearcher {
    /// Result to return. `None` behaves like an empty index.
    result: Arc<RwLock<Option<IndexerResult>>>,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<MediaDescriptor>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<SearchError>>>,
}

impl MockSearcher {
    /// Create a new mock searcher with no result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result to return for subsequent searches.
    pub async fn set_result(&self, result: IndexerResult) {
        *self.result.write().await = Some(result);
    }

    /// Clear the result so searches report not-found.
    pub async fn clear_result(&self) {
        *self.result.write().await = None;
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get recorded searches.
    pub async fn recorded_searches(&self) -> Vec<MediaDescriptor> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(
        &self,
        ctx: &ScrapeContext,
        media: &MediaDescriptor,
    ) -> Result<IndexerResult, SearchError> {
        self.searches.write().await.push(media.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        match self.result.read().await.clone() {
            Some(result) => {
                ctx.progress(30);
                Ok(result)
            }
            None => Err(SearchError::NotFound("No valid torrents found".to_string())),
        }
    }
}
