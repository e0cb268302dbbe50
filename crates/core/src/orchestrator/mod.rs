//! Scrape orchestration.
//!
//! `RealDebridScraper` runs a search, hands the chosen magnet to the debrid
//! service, and maps the resolved files into the host's output shape.

mod error;
mod scraper;
mod types;

pub use error::{FailureKind, ScrapeError};
pub use scraper::RealDebridScraper;
pub use types::*;
