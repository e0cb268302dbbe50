//! Per-scrape capabilities handed in by the caller.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;

/// Callback receiving coarse progress percentages (0-100).
pub type ProgressCallback = Arc<dyn Fn(u8) + Send + Sync>;

/// Network access and progress reporting for a single scrape.
///
/// The HTTP client is the only way the scraper talks to the outside world,
/// so timeouts and proxies are whatever the caller configured on it.
#[derive(Clone)]
pub struct ScrapeContext {
    http: Client,
    progress: Option<ProgressCallback>,
}

impl ScrapeContext {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Report a progress milestone. No-op without a callback.
    pub fn progress(&self, percent: u8) {
        if let Some(cb) = &self.progress {
            cb(percent.min(100));
        }
    }
}

impl fmt::Debug for ScrapeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrapeContext")
            .field("http", &self.http)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
