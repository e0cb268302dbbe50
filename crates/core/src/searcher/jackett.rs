//! Jackett search backend implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::JackettConfig;
use crate::context::ScrapeContext;
use crate::media::MediaDescriptor;
use crate::metrics::JACKETT_REQUESTS;

use super::{IndexerResult, SearchError, Searcher};

/// Torznab movie categories (Movies and all of its subcategories).
pub const MOVIE_CATEGORIES: &str = "2000,2010,2020,2030,2040,2045,2050,2060";

/// Torznab TV categories.
pub const TV_CATEGORIES: &str = "5000,5020,5030,5040,5045,5050,5060";

/// Jackett search backend implementation.
///
/// Queries the aggregate `all` indexer and keeps only the healthiest
/// release: most seeders first, larger size on ties.
pub struct JackettSearcher {
    config: JackettConfig,
}

impl JackettSearcher {
    /// Create a new JackettSearcher with the given configuration.
    pub fn new(config: JackettConfig) -> Self {
        Self { config }
    }

    /// Build the Jackett API URL for a search.
    fn build_search_url(&self, media: &MediaDescriptor) -> String {
        let mut url = format!(
            "{}/api/v2.0/indexers/all/results/torznab?apikey={}",
            self.config.url.trim_end_matches('/'),
            urlencoding::encode(&self.config.api_key),
        );

        match media {
            MediaDescriptor::Movie(movie) => {
                url.push_str("&t=movie");
                url.push_str(&format!("&cat={}", urlencoding::encode(MOVIE_CATEGORIES)));
                match media.imdb_id() {
                    Some(id) => url.push_str(&format!("&imdbid={}", urlencoding::encode(id))),
                    None => {
                        let q = format!("{} {}", movie.title, movie.year);
                        url.push_str(&format!("&q={}", urlencoding::encode(&q)));
                    }
                }
            }
            MediaDescriptor::Show(show) => {
                url.push_str("&t=tvsearch");
                url.push_str(&format!("&cat={}", urlencoding::encode(TV_CATEGORIES)));
                match media.imdb_id() {
                    Some(id) => url.push_str(&format!("&imdbid={}", urlencoding::encode(id))),
                    None => url.push_str(&format!("&q={}", urlencoding::encode(&show.title))),
                }
                url.push_str(&format!("&season={}&ep={}", show.season, show.episode));
            }
        }

        url
    }

    async fn fetch_results(
        &self,
        ctx: &ScrapeContext,
        media: &MediaDescriptor,
    ) -> Result<Vec<JackettResult>, SearchError> {
        let url = self.build_search_url(media);

        let response = ctx
            .http()
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(e.without_url()))?;
        let payload: JackettPayload = serde_json::from_str(&body)
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        Ok(payload.into_results())
    }
}

#[async_trait]
impl Searcher for JackettSearcher {
    fn name(&self) -> &str {
        "jackett"
    }

    async fn search(
        &self,
        ctx: &ScrapeContext,
        media: &MediaDescriptor,
    ) -> Result<IndexerResult, SearchError> {
        debug!(
            media_type = media.kind().as_str(),
            title = %media.title(),
            imdb_id = ?media.imdb_id(),
            "Searching Jackett"
        );

        let results = match self.fetch_results(ctx, media).await {
            Ok(results) => results,
            Err(e) => {
                JACKETT_REQUESTS.with_label_values(&["error"]).inc();
                warn!(error = %e, "Jackett search failed");
                return Err(e);
            }
        };

        let total = results.len();
        let Some(best) = select_best(results) else {
            JACKETT_REQUESTS.with_label_values(&["empty"]).inc();
            debug!(results = total, "No Jackett result with seeders");
            return Err(SearchError::NotFound("No valid torrents found".to_string()));
        };

        JACKETT_REQUESTS.with_label_values(&["success"]).inc();
        debug!(
            results = total,
            title = %best.title,
            seeders = best.seeders,
            size_bytes = best.size_bytes,
            "Selected torrent"
        );

        ctx.progress(30);
        Ok(best)
    }
}

/// Pick the best candidate: seeded, has a magnet, most seeders, then largest.
fn select_best(results: Vec<JackettResult>) -> Option<IndexerResult> {
    let mut candidates: Vec<IndexerResult> = results
        .into_iter()
        .filter_map(JackettResult::into_indexer_result)
        .filter(|r| r.seeders > 0)
        .collect();

    // Stable sort keeps indexer order among exact ties.
    candidates.sort_by(|a, b| {
        b.seeders
            .cmp(&a.seeders)
            .then_with(|| b.size_bytes.cmp(&a.size_bytes))
    });

    candidates.into_iter().next()
}

/// Parse Jackett's date format.
fn parse_jackett_date(date_str: &str) -> Option<DateTime<Utc>> {
    // Jackett returns dates in ISO 8601 format
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            // Try parsing without timezone
            chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|ndt| ndt.and_utc())
        })
}

// Jackett API response types

/// The torznab JSON endpoint returns a bare array; the plain results
/// endpoint wraps it in `Results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
#[allow(non_snake_case)]
enum JackettPayload {
    Bare(Vec<JackettResult>),
    Wrapped { Results: Vec<JackettResult> },
}

impl JackettPayload {
    fn into_results(self) -> Vec<JackettResult> {
        match self {
            JackettPayload::Bare(results) => results,
            JackettPayload::Wrapped { Results: results } => results,
        }
    }
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct JackettResult {
    Title: String,
    Link: Option<String>,
    MagnetUri: Option<String>,
    Size: Option<i64>,
    Seeders: Option<i64>,
    PublishDate: Option<String>,
}

impl JackettResult {
    fn into_indexer_result(self) -> Option<IndexerResult> {
        let magnet_uri = self.MagnetUri.filter(|m| !m.is_empty())?;
        Some(IndexerResult {
            title: self.Title,
            link: self.Link,
            magnet_uri,
            size_bytes: self.Size.unwrap_or(0).max(0) as u64,
            seeders: self.Seeders.unwrap_or(0).clamp(0, u32::MAX as i64) as u32,
            publish_date: self.PublishDate.as_deref().and_then(parse_jackett_date),
        })
    }
}
