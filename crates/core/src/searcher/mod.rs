//! Torrent search abstraction.
//!
//! This module provides a `Searcher` trait that turns a media descriptor into
//! the single best torrent, with Jackett as the backend.

mod jackett;
mod types;

pub use jackett::{JackettSearcher, MOVIE_CATEGORIES, TV_CATEGORIES};
pub use types::*;
