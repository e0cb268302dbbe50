//! Real-Debrid REST client.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Response;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{PollingConfig, RealDebridConfig};
use crate::context::ScrapeContext;
use crate::metrics::{DEBRID_REQUESTS, UNRESTRICT_FAILURES};

use super::quality::{classify_quality, rank_streams};
use super::{CachedTorrent, DebridClient, DebridError, ResolvedStream};

const MISSING_TOKEN: &str = "Real-Debrid API token is not configured. \
     Please set REAL_DEBRID_API_TOKEN environment variable.";

/// Real-Debrid client.
///
/// Every call is bearer-authenticated with the configured token. Requests go
/// through the HTTP client carried by the [`ScrapeContext`].
pub struct RealDebridClient {
    config: RealDebridConfig,
}

impl RealDebridClient {
    /// Create a new Real-Debrid client.
    pub fn new(config: RealDebridConfig) -> Self {
        Self { config }
    }

    /// Override the configured token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = Some(token.into());
        self
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn token(&self) -> Result<&str, DebridError> {
        match self.config.api_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(DebridError::NotConfigured(MISSING_TOKEN.to_string())),
        }
    }

    /// POST /torrents/addMagnet
    async fn add_magnet(
        &self,
        ctx: &ScrapeContext,
        token: &str,
        magnet_uri: &str,
    ) -> Result<CachedTorrent, DebridError> {
        let url = format!("{}/torrents/addMagnet", self.base_url());
        let response = ctx
            .http()
            .post(&url)
            .bearer_auth(token)
            .form(&[("magnet", magnet_uri)])
            .send()
            .await?;

        let response = check_response(response, "add_magnet", "add torrent to Real-Debrid").await?;
        parse_json(response).await
    }

    /// POST /torrents/selectFiles/{id}
    async fn select_all_files(
        &self,
        ctx: &ScrapeContext,
        token: &str,
        torrent_id: &str,
    ) -> Result<(), DebridError> {
        let url = format!(
            "{}/torrents/selectFiles/{}",
            self.base_url(),
            urlencoding::encode(torrent_id)
        );
        let response = ctx
            .http()
            .post(&url)
            .bearer_auth(token)
            .form(&[("all", "1")])
            .send()
            .await?;

        check_response(response, "select_files", "select files").await?;
        Ok(())
    }

    /// GET /torrents/info/{id}
    async fn torrent_info(
        &self,
        ctx: &ScrapeContext,
        token: &str,
        torrent_id: &str,
    ) -> Result<CachedTorrent, DebridError> {
        let url = format!(
            "{}/torrents/info/{}",
            self.base_url(),
            urlencoding::encode(torrent_id)
        );
        let response = ctx.http().get(&url).bearer_auth(token).send().await?;

        let response = check_response(response, "info", "get torrent status").await?;
        parse_json(response).await
    }

    /// Read torrent info until it is downloaded.
    ///
    /// With polling disabled this is a single check.
    async fn wait_until_downloaded(
        &self,
        ctx: &ScrapeContext,
        token: &str,
        torrent_id: &str,
    ) -> Result<CachedTorrent, DebridError> {
        let torrent = self.torrent_info(ctx, token, torrent_id).await?;
        debug!(torrent_id = torrent_id, status = %torrent.status, "Torrent status");

        if torrent.status.is_downloaded() {
            return Ok(torrent);
        }

        let polling = &self.config.polling;
        if !polling.is_enabled() || torrent.status.is_failed() {
            return Err(DebridError::NotReady {
                status: torrent.status.to_string(),
            });
        }

        let deadline = Instant::now() + Duration::from_secs(polling.max_wait_secs);
        let mut backoff = Backoff::new(polling);
        let mut status = torrent.status;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Err(DebridError::StillProcessing {
                    status: status.to_string(),
                    waited_secs: polling.max_wait_secs,
                });
            }

            let delay = backoff.next_delay().min(deadline - now);
            debug!(
                torrent_id = torrent_id,
                status = %status,
                delay_ms = delay.as_millis() as u64,
                "Torrent not downloaded yet, waiting"
            );
            tokio::time::sleep(delay).await;

            let torrent = self.torrent_info(ctx, token, torrent_id).await?;
            if torrent.status.is_downloaded() {
                return Ok(torrent);
            }
            if torrent.status.is_failed() {
                return Err(DebridError::NotReady {
                    status: torrent.status.to_string(),
                });
            }
            status = torrent.status;
        }
    }

    /// POST /unrestrict/link
    async fn unrestrict(
        &self,
        ctx: &ScrapeContext,
        token: &str,
        link: &str,
    ) -> Result<UnrestrictedLink, DebridError> {
        let url = format!("{}/unrestrict/link", self.base_url());
        let response = ctx
            .http()
            .post(&url)
            .bearer_auth(token)
            .form(&[("link", link)])
            .send()
            .await?;

        let response = check_response(response, "unrestrict", "unrestrict link").await?;
        parse_json(response).await
    }
}

#[async_trait]
impl DebridClient for RealDebridClient {
    fn name(&self) -> &str {
        "real-debrid"
    }

    async fn submit(
        &self,
        ctx: &ScrapeContext,
        magnet_uri: &str,
    ) -> Result<CachedTorrent, DebridError> {
        let token = self.token()?;

        info!("Adding magnet to Real-Debrid");
        let torrent = self.add_magnet(ctx, token, magnet_uri).await?;
        info!(torrent_id = %torrent.id, "Torrent added");

        debug!(torrent_id = %torrent.id, "Selecting all files");
        self.select_all_files(ctx, token, &torrent.id).await?;

        ctx.progress(60);
        Ok(torrent)
    }

    async fn retrieve(
        &self,
        ctx: &ScrapeContext,
        torrent_id: &str,
    ) -> Result<Vec<ResolvedStream>, DebridError> {
        let token = self.token()?;

        let torrent = self.wait_until_downloaded(ctx, token, torrent_id).await?;
        debug!(torrent_id = torrent_id, links = torrent.links.len(), "Unrestricting links");

        // buffered() yields in input order, so ids match sequential processing.
        let results: Vec<Result<UnrestrictedLink, DebridError>> =
            stream::iter(torrent.links.clone())
                .map(|link| async move { self.unrestrict(ctx, token, &link).await })
                .buffered(self.config.unrestrict_concurrency.max(1))
                .collect()
                .await;

        let mut streams = Vec::with_capacity(results.len());
        for (link, result) in torrent.links.iter().zip(results) {
            match result {
                Ok(unrestricted) => {
                    debug!(filename = %unrestricted.filename, "Unrestricted link");
                    let id = streams.len() as u32 + 1;
                    streams.push(unrestricted.into_stream(id));
                }
                Err(e) => {
                    UNRESTRICT_FAILURES.inc();
                    warn!(link = %link, error = %e, "Failed to unrestrict link, skipping");
                }
            }
        }

        if streams.is_empty() {
            warn!(torrent_id = torrent_id, "No valid streams found");
            return Err(DebridError::NotFound("No valid streams found".to_string()));
        }

        rank_streams(&mut streams);
        info!(torrent_id = torrent_id, streams = streams.len(), "Resolved streams");

        ctx.progress(90);
        Ok(streams)
    }
}

/// Exponential backoff between status checks.
struct Backoff {
    current: Duration,
    max: Duration,
}

impl Backoff {
    fn new(config: &PollingConfig) -> Self {
        let initial = Duration::from_millis(config.initial_interval_ms.max(1));
        Self {
            current: initial,
            max: Duration::from_millis(config.max_interval_ms).max(initial),
        }
    }

    fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }
}

/// Turn a non-success response into [`DebridError::Api`].
async fn check_response(
    response: Response,
    metric_op: &str,
    operation: &str,
) -> Result<Response, DebridError> {
    let status = response.status();
    if status.is_success() {
        DEBRID_REQUESTS.with_label_values(&[metric_op, "success"]).inc();
        return Ok(response);
    }

    DEBRID_REQUESTS.with_label_values(&[metric_op, "error"]).inc();
    let body = response.text().await.unwrap_or_default();
    let error: RdErrorBody = serde_json::from_str(&body).unwrap_or_default();
    warn!(
        operation = operation,
        status = status.as_u16(),
        error = ?error.error,
        error_code = ?error.error_code,
        "Real-Debrid request failed"
    );

    Err(DebridError::Api {
        operation: operation.to_string(),
        message: error.error.unwrap_or_else(|| "Unknown error".to_string()),
        code: error
            .error_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, DebridError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| DebridError::Parse(e.to_string()))
}

// Real-Debrid API response types

#[derive(Debug, Default, Deserialize)]
struct RdErrorBody {
    error: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnrestrictedLink {
    #[serde(default)]
    filename: String,
    #[serde(default)]
    mime_type: String,
    #[serde(default)]
    filesize: u64,
    download: String,
    #[serde(default)]
    host: String,
}

impl UnrestrictedLink {
    fn into_stream(self, id: u32) -> ResolvedStream {
        let quality = classify_quality(&self.filename);
        ResolvedStream {
            id,
            filename: self.filename,
            mime_type: self.mime_type,
            filesize: self.filesize,
            link: self.download,
            host: self.host,
            quality,
        }
    }
}
