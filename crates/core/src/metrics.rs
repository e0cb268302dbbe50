//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Scrapes (outcome and duration per media type)
//! - External services (Jackett, Real-Debrid)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Scrape Metrics
// =============================================================================

/// Scrapes total by media type and result.
pub static SCRAPES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scout_scrapes_total", "Total scrape invocations"),
        &["media_type", "result"], // "ok", "not_found", "failed"
    )
    .unwrap()
});

/// End-to-end scrape duration in seconds.
pub static SCRAPE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "scout_scrape_duration_seconds",
            "Duration of a full scrape (search, submit, retrieve)",
        )
        .buckets(vec![0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["media_type"],
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// Jackett search requests by result.
pub static JACKETT_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scout_jackett_requests_total", "Total Jackett search requests"),
        &["result"], // "success", "error", "empty"
    )
    .unwrap()
});

/// Real-Debrid API calls by operation and result.
pub static DEBRID_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scout_debrid_requests_total", "Total Real-Debrid API calls"),
        &["operation", "result"], // operation: add_magnet, select_files, info, unrestrict
    )
    .unwrap()
});

/// Links that could not be unrestricted and were skipped.
pub static UNRESTRICT_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "scout_unrestrict_failures_total",
        "Links skipped because unrestricting failed",
    )
    .unwrap()
});

/// All core metrics, for registration by the host.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Scrapes
        Box::new(SCRAPES_TOTAL.clone()),
        Box::new(SCRAPE_DURATION.clone()),
        // External services
        Box::new(JACKETT_REQUESTS.clone()),
        Box::new(DEBRID_REQUESTS.clone()),
        Box::new(UNRESTRICT_FAILURES.clone()),
    ]
}
