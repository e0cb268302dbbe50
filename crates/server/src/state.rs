use std::sync::Arc;

use reqwest::Client;
use scout_core::{Config, MediaKind, RealDebridScraper, SanitizedConfig, ScrapeContext};
use tracing::debug;

/// Shared application state
pub struct AppState {
    config: Config,
    scraper: RealDebridScraper,
    http: Client,
}

impl AppState {
    pub fn new(config: Config, scraper: RealDebridScraper, http: Client) -> Self {
        Self {
            config,
            scraper,
            http,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn scraper(&self) -> &RealDebridScraper {
        &self.scraper
    }

    /// Fresh context for one scrape. Progress goes to the debug log.
    pub fn scrape_context(&self, kind: MediaKind) -> ScrapeContext {
        let media_type = kind.as_str();
        ScrapeContext::new(self.http.clone()).with_progress(Arc::new(move |percent| {
            debug!(media_type = media_type, progress = percent, "Scrape progress");
        }))
    }
}
