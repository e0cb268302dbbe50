//! Mock debrid client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::context::ScrapeContext;
use crate::debrid::{
    rank_streams, CachedTorrent, DebridClient, DebridError, ResolvedStream, TorrentStatus,
};

/// Mock implementation of the DebridClient trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable torrent from `submit`
/// - Return configurable streams from `retrieve` (ranked like the real client)
/// - Record submitted magnets and retrieved ids
/// - Simulate failures on either step
#[derive(Debug, Clone, Default)]
pub struct MockDebridClient {
    torrent: Arc<RwLock<Option<CachedTorrent>>>,
    streams: Arc<RwLock<Vec<ResolvedStream>>>,
    submit_error: Arc<RwLock<Option<DebridError>>>,
    retrieve_error: Arc<RwLock<Option<DebridError>>>,
    submitted: Arc<RwLock<Vec<String>>>,
    retrieved: Arc<RwLock<Vec<String>>>,
}

impl MockDebridClient {
    /// Create a new mock client with no streams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the torrent returned by `submit`.
    pub async fn set_torrent(&self, torrent: CachedTorrent) {
        *self.torrent.write().await = Some(torrent);
    }

    /// Set the streams returned by `retrieve`.
    pub async fn set_streams(&self, streams: Vec<ResolvedStream>) {
        *self.streams.write().await = streams;
    }

    /// Configure the next `submit` to fail.
    pub async fn set_submit_error(&self, error: DebridError) {
        *self.submit_error.write().await = Some(error);
    }

    /// Configure the next `retrieve` to fail.
    pub async fn set_retrieve_error(&self, error: DebridError) {
        *self.retrieve_error.write().await = Some(error);
    }

    /// Magnets passed to `submit`, in call order.
    pub async fn submitted_magnets(&self) -> Vec<String> {
        self.submitted.read().await.clone()
    }

    /// Torrent ids passed to `retrieve`, in call order.
    pub async fn retrieved_ids(&self) -> Vec<String> {
        self.retrieved.read().await.clone()
    }
}

#[async_trait]
impl DebridClient for MockDebridClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn submit(
        &self,
        ctx: &ScrapeContext,
        magnet_uri: &str,
    ) -> Result<CachedTorrent, DebridError> {
        self.submitted.write().await.push(magnet_uri.to_string());

        if let Some(error) = self.submit_error.write().await.take() {
            return Err(error);
        }

        let torrent = self.torrent.read().await.clone().unwrap_or(CachedTorrent {
            id: "mock-torrent".to_string(),
            filename: String::new(),
            hash: String::new(),
            bytes: 0,
            links: Vec::new(),
            status: TorrentStatus::WaitingFilesSelection,
        });

        ctx.progress(60);
        Ok(torrent)
    }

    async fn retrieve(
        &self,
        ctx: &ScrapeContext,
        torrent_id: &str,
    ) -> Result<Vec<ResolvedStream>, DebridError> {
        self.retrieved.write().await.push(torrent_id.to_string());

        if let Some(error) = self.retrieve_error.write().await.take() {
            return Err(error);
        }

        let mut streams = self.streams.read().await.clone();
        if streams.is_empty() {
            return Err(DebridError::NotFound("No valid streams found".to_string()));
        }
        rank_streams(&mut streams);

        ctx.progress(90);
        Ok(streams)
    }
}
