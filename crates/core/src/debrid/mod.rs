//! Debrid service abstraction.
//!
//! This module provides a `DebridClient` trait that caches a torrent on a
//! debrid service and turns its files into direct stream URLs, with
//! Real-Debrid as the backend.

mod quality;
mod realdebrid;
mod types;

pub use quality::{classify_quality, rank_streams, Quality};
pub use realdebrid::RealDebridClient;
pub use types::*;
