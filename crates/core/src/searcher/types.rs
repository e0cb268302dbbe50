//! Types for the torrent search system.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ScrapeContext;
use crate::media::MediaDescriptor;

/// The torrent picked for a media descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexerResult {
    /// Release title as reported by the indexer.
    pub title: String,
    /// .torrent download URL, if the indexer exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Magnet URI submitted to the debrid service.
    pub magnet_uri: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Seeders reported by the indexer.
    pub seeders: u32,
    /// When the torrent was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<DateTime<Utc>>,
}

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Jackett request failed: {0}")]
    Http(reqwest::Error),

    #[error("Jackett API error: {status} {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Jackett response: {0}")]
    Parse(String),

    /// Nothing usable came back. Callers fall through to other sources.
    #[error("{0}")]
    NotFound(String),
}

impl SearchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SearchError::NotFound(_))
    }
}

/// Trait for torrent search backends.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Find the single best torrent for `media`.
    ///
    /// Reports progress 30 on success.
    async fn search(
        &self,
        ctx: &ScrapeContext,
        media: &MediaDescriptor,
    ) -> Result<IndexerResult, SearchError>;
}
