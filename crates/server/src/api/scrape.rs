//! Scrape API handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scout_core::{FailureKind, MediaDescriptor, ScrapeError, SourcererOutput};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

/// A failed scrape, rendered as a JSON error body.
#[derive(Debug)]
pub struct ScrapeFailure(pub ScrapeError);

impl ScrapeFailure {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self.0.kind() {
            None => (StatusCode::NOT_FOUND, "not_found"),
            Some(FailureKind::Config) => (StatusCode::SERVICE_UNAVAILABLE, "config"),
            Some(FailureKind::NotReady) => (StatusCode::CONFLICT, "not_ready"),
            Some(FailureKind::StillProcessing) => (StatusCode::CONFLICT, "still_processing"),
            Some(FailureKind::Upstream) => (StatusCode::BAD_GATEWAY, "upstream"),
        }
    }
}

impl IntoResponse for ScrapeFailure {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let body = ErrorResponse {
            error: self.0.to_string(),
            kind,
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/v1/scrape
///
/// Run a full scrape for the movie or episode in the body.
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Json(media): Json<MediaDescriptor>,
) -> Result<Json<SourcererOutput>, ScrapeFailure> {
    let ctx = state.scrape_context(media.kind());
    state
        .scraper()
        .scrape(&ctx, &media)
        .await
        .map(Json)
        .map_err(ScrapeFailure)
}
