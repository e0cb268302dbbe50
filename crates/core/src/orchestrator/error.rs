use serde::Serialize;
use thiserror::Error;

use crate::debrid::DebridError;
use crate::media::MediaKind;
use crate::searcher::SearchError;

/// Why a scrape failed, beyond "nothing found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing credential. Retrying will not help.
    Config,
    /// An upstream service errored or returned garbage.
    Upstream,
    /// The torrent was not cached yet on a single check.
    NotReady,
    /// The torrent was still not cached when the poll bound ran out.
    StillProcessing,
}

/// Errors returned by a scrape.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Nothing available. Passed through from any step without a prefix.
    #[error("{0}")]
    NotFound(String),

    #[error("{operation} failed: {message}")]
    Failed {
        operation: &'static str,
        kind: FailureKind,
        message: String,
    },
}

impl ScrapeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScrapeError::NotFound(_))
    }

    /// `None` for not-found.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ScrapeError::NotFound(_) => None,
            ScrapeError::Failed { kind, .. } => Some(*kind),
        }
    }

    pub(crate) fn from_search(media: MediaKind, err: SearchError) -> Self {
        match err {
            SearchError::NotFound(message) => ScrapeError::NotFound(message),
            other => ScrapeError::Failed {
                operation: operation_name(media),
                kind: FailureKind::Upstream,
                message: format!("Failed to search Jackett: {}", other),
            },
        }
    }

    pub(crate) fn from_debrid(media: MediaKind, err: DebridError) -> Self {
        let kind = match &err {
            DebridError::NotFound(_) => {
                return ScrapeError::NotFound(err.to_string());
            }
            DebridError::NotConfigured(_) => FailureKind::Config,
            DebridError::NotReady { .. } => FailureKind::NotReady,
            DebridError::StillProcessing { .. } => FailureKind::StillProcessing,
            DebridError::Http(_) | DebridError::Api { .. } | DebridError::Parse(_) => {
                FailureKind::Upstream
            }
        };
        ScrapeError::Failed {
            operation: operation_name(media),
            kind,
            message: err.to_string(),
        }
    }
}

fn operation_name(media: MediaKind) -> &'static str {
    match media {
        MediaKind::Movie => "Movie scraping",
        MediaKind::Show => "Show scraping",
    }
}
