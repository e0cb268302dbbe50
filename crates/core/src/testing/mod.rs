//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external service traits,
//! allowing scraper and host tests without Jackett or Real-Debrid.
//!
//! # Example
//!
//! ```rust,ignore
//! use scout_core::testing::{fixtures, MockDebridClient, MockSearcher};
//!
//! let searcher = MockSearcher::new();
//! let debrid = MockDebridClient::new();
//!
//! // Configure mock responses
//! searcher.set_result(fixtures::indexer_result("Example.2020.1080p", 80, 500_000_000)).await;
//! debrid.set_streams(vec![fixtures::resolved_stream(1, "Example.2020.1080p.mkv", 4_000_000_000)]).await;
//!
//! let scraper = RealDebridScraper::new(Arc::new(searcher), Arc::new(debrid));
//! ```

mod mock_debrid_client;
mod mock_searcher;

pub use mock_debrid_client::MockDebridClient;
pub use mock_searcher::MockSearcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::debrid::{classify_quality, CachedTorrent, ResolvedStream, TorrentStatus};
    use crate::media::{MovieMedia, ShowMedia};
    use crate::searcher::IndexerResult;

    /// Create a movie descriptor without an IMDb id.
    pub fn movie(title: &str, year: u32) -> MovieMedia {
        MovieMedia {
            title: title.to_string(),
            imdb_id: None,
            year,
        }
    }

    /// Create a show episode descriptor without an IMDb id.
    pub fn show(title: &str, season: u32, episode: u32) -> ShowMedia {
        ShowMedia {
            title: title.to_string(),
            imdb_id: None,
            season,
            episode,
        }
    }

    /// Create an indexer result whose magnet embeds the title.
    pub fn indexer_result(title: &str, seeders: u32, size_bytes: u64) -> IndexerResult {
        IndexerResult {
            title: title.to_string(),
            link: None,
            magnet_uri: format!("magnet:?xt=urn:btih:{}", title),
            size_bytes,
            seeders,
            publish_date: None,
        }
    }

    /// Create a downloaded torrent with `links` hoster links.
    pub fn cached_torrent(id: &str, links: usize) -> CachedTorrent {
        CachedTorrent {
            id: id.to_string(),
            filename: format!("{}.mkv", id),
            hash: format!("{:0>40}", id),
            bytes: 1024 * 1024 * 1024,
            links: (1..=links)
                .map(|i| format!("https://real-debrid.com/d/{}{}", id, i))
                .collect(),
            status: TorrentStatus::Downloaded,
        }
    }

    /// Create a resolved stream; quality comes from the filename.
    pub fn resolved_stream(id: u32, filename: &str, filesize: u64) -> ResolvedStream {
        ResolvedStream {
            id,
            filename: filename.to_string(),
            mime_type: "video/x-matroska".to_string(),
            filesize,
            link: format!("https://download.real-debrid.com/d/{}/{}", id, filename),
            host: "real-debrid.com".to_string(),
            quality: classify_quality(filename),
        }
    }
}
