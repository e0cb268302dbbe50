//! Sequences search, debrid submission and retrieval into one scrape.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::context::ScrapeContext;
use crate::debrid::{DebridClient, RealDebridClient};
use crate::media::{MediaDescriptor, MovieMedia, ShowMedia};
use crate::metrics::{SCRAPES_TOTAL, SCRAPE_DURATION};
use crate::searcher::{JackettSearcher, Searcher};

use super::{Flag, ScrapeError, SourceInfo, SourcererOutput, StreamDescriptor};

/// Real-Debrid backed stream source.
///
/// Progress milestones for a successful scrape are exactly
/// 10, 30, 60, 90, 100. The searcher and debrid client report the middle three.
pub struct RealDebridScraper {
    searcher: Arc<dyn Searcher>,
    debrid: Arc<dyn DebridClient>,
}

impl RealDebridScraper {
    pub fn new(searcher: Arc<dyn Searcher>, debrid: Arc<dyn DebridClient>) -> Self {
        Self { searcher, debrid }
    }

    /// Wire up Jackett and Real-Debrid from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(JackettSearcher::new(config.jackett.clone())),
            Arc::new(RealDebridClient::new(config.real_debrid.clone())),
        )
    }

    pub fn info() -> SourceInfo {
        SourceInfo {
            id: "realdebrid".to_string(),
            name: "Real-Debrid".to_string(),
            rank: 200,
            flags: vec![Flag::CorsAllowed],
        }
    }

    pub async fn scrape_movie(
        &self,
        ctx: &ScrapeContext,
        movie: MovieMedia,
    ) -> Result<SourcererOutput, ScrapeError> {
        self.scrape(ctx, &MediaDescriptor::Movie(movie)).await
    }

    pub async fn scrape_show(
        &self,
        ctx: &ScrapeContext,
        show: ShowMedia,
    ) -> Result<SourcererOutput, ScrapeError> {
        self.scrape(ctx, &MediaDescriptor::Show(show)).await
    }

    /// Run a full scrape for either media type.
    pub async fn scrape(
        &self,
        ctx: &ScrapeContext,
        media: &MediaDescriptor,
    ) -> Result<SourcererOutput, ScrapeError> {
        let media_type = media.kind().as_str();
        let start = Instant::now();

        let result = self.run(ctx, media).await;

        SCRAPE_DURATION
            .with_label_values(&[media_type])
            .observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(output) => {
                SCRAPES_TOTAL.with_label_values(&[media_type, "ok"]).inc();
                info!(
                    media_type = media_type,
                    title = %media.title(),
                    streams = output.stream.len(),
                    "Scrape complete"
                );
            }
            Err(e) if e.is_not_found() => {
                SCRAPES_TOTAL.with_label_values(&[media_type, "not_found"]).inc();
                info!(media_type = media_type, title = %media.title(), reason = %e, "Nothing found");
            }
            Err(e) => {
                SCRAPES_TOTAL.with_label_values(&[media_type, "failed"]).inc();
                warn!(media_type = media_type, title = %media.title(), error = %e, "Scrape failed");
            }
        }

        result
    }

    async fn run(
        &self,
        ctx: &ScrapeContext,
        media: &MediaDescriptor,
    ) -> Result<SourcererOutput, ScrapeError> {
        let kind = media.kind();
        ctx.progress(10);

        let torrent = self
            .searcher
            .search(ctx, media)
            .await
            .map_err(|e| ScrapeError::from_search(kind, e))?;
        debug!(
            searcher = self.searcher.name(),
            title = %torrent.title,
            seeders = torrent.seeders,
            "Best torrent selected"
        );

        let cached = self
            .debrid
            .submit(ctx, &torrent.magnet_uri)
            .await
            .map_err(|e| ScrapeError::from_debrid(kind, e))?;

        let streams = self
            .debrid
            .retrieve(ctx, &cached.id)
            .await
            .map_err(|e| ScrapeError::from_debrid(kind, e))?;

        ctx.progress(100);

        Ok(SourcererOutput {
            stream: streams.into_iter().map(StreamDescriptor::from).collect(),
            embeds: Vec::new(),
        })
    }
}
