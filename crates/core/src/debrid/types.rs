//! Types for debrid service operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ScrapeContext;

use super::quality::Quality;

/// Errors that can occur during debrid operations.
#[derive(Debug, Error)]
pub enum DebridError {
    /// Missing credential. Not retried.
    #[error("{0}")]
    NotConfigured(String),

    #[error("Real-Debrid request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Failed to {operation}: {message} (code: {code})")]
    Api {
        operation: String,
        message: String,
        code: String,
    },

    #[error("Failed to parse Real-Debrid response: {0}")]
    Parse(String),

    #[error("Torrent not ready. Current status: {status}")]
    NotReady { status: String },

    #[error("Torrent still processing after {waited_secs}s. Current status: {status}")]
    StillProcessing { status: String, waited_secs: u64 },

    /// Nothing playable. Callers fall through to other sources.
    #[error("{0}")]
    NotFound(String),
}

impl DebridError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DebridError::NotFound(_))
    }
}

/// Torrent status in Real-Debrid's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TorrentStatus {
    MagnetError,
    MagnetConversion,
    WaitingFilesSelection,
    Queued,
    Downloading,
    Downloaded,
    Error,
    Virus,
    Compressing,
    Uploading,
    Dead,
    /// Anything the service adds later, kept verbatim.
    Other(String),
}

impl TorrentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TorrentStatus::MagnetError => "magnet_error",
            TorrentStatus::MagnetConversion => "magnet_conversion",
            TorrentStatus::WaitingFilesSelection => "waiting_files_selection",
            TorrentStatus::Queued => "queued",
            TorrentStatus::Downloading => "downloading",
            TorrentStatus::Downloaded => "downloaded",
            TorrentStatus::Error => "error",
            TorrentStatus::Virus => "virus",
            TorrentStatus::Compressing => "compressing",
            TorrentStatus::Uploading => "uploading",
            TorrentStatus::Dead => "dead",
            TorrentStatus::Other(s) => s,
        }
    }

    /// Fully cached; links can be unrestricted.
    pub fn is_downloaded(&self) -> bool {
        matches!(self, TorrentStatus::Downloaded)
    }

    /// Terminal failure; waiting longer will not help.
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            TorrentStatus::MagnetError
                | TorrentStatus::Error
                | TorrentStatus::Virus
                | TorrentStatus::Dead
        )
    }
}

impl Default for TorrentStatus {
    fn default() -> Self {
        TorrentStatus::Other("unknown".to_string())
    }
}

impl From<String> for TorrentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "magnet_error" => TorrentStatus::MagnetError,
            "magnet_conversion" => TorrentStatus::MagnetConversion,
            "waiting_files_selection" => TorrentStatus::WaitingFilesSelection,
            "queued" => TorrentStatus::Queued,
            "downloading" => TorrentStatus::Downloading,
            "downloaded" => TorrentStatus::Downloaded,
            "error" => TorrentStatus::Error,
            "virus" => TorrentStatus::Virus,
            "compressing" => TorrentStatus::Compressing,
            "uploading" => TorrentStatus::Uploading,
            "dead" => TorrentStatus::Dead,
            _ => TorrentStatus::Other(s),
        }
    }
}

impl From<TorrentStatus> for String {
    fn from(status: TorrentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TorrentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A torrent known to the debrid service.
///
/// The add-magnet call only returns `id`, so every other field defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedTorrent {
    pub id: String,
    #[serde(default)]
    pub filename: String,
    /// Info hash.
    #[serde(default)]
    pub hash: String,
    /// Total size in bytes.
    #[serde(default)]
    pub bytes: u64,
    /// Restricted hoster links, one per selected file.
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub status: TorrentStatus,
}

/// A directly playable file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStream {
    /// 1-based position among successfully unrestricted links.
    pub id: u32,
    pub filename: String,
    pub mime_type: String,
    /// Size in bytes.
    pub filesize: u64,
    /// Direct, time-limited download URL.
    pub link: String,
    /// Hosting provider.
    pub host: String,
    pub quality: Quality,
}

/// Trait for debrid cache backends.
#[async_trait]
pub trait DebridClient: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Submit a magnet and select all of its files for caching.
    ///
    /// Reports progress 60 on success.
    async fn submit(&self, ctx: &ScrapeContext, magnet_uri: &str)
        -> Result<CachedTorrent, DebridError>;

    /// Resolve a cached torrent into ranked direct streams.
    ///
    /// Reports progress 90 on success.
    async fn retrieve(
        &self,
        ctx: &ScrapeContext,
        torrent_id: &str,
    ) -> Result<Vec<ResolvedStream>, DebridError>;
}
