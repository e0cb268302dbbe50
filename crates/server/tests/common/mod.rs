//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that builds the router in-process
//! with mock search and debrid backends injected, so no Jackett or
//! Real-Debrid instance is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use scout_core::{
    testing::{MockDebridClient, MockSearcher},
    Config, DebridClient, HttpConfig, JackettConfig, RealDebridConfig, RealDebridScraper,
    Searcher, ServerConfig,
};
use scout_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use scout_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_scrape() {
///     let fixture = TestFixture::new();
///     fixture.searcher.set_result(fixtures::indexer_result("x", 1, 1)).await;
///
///     let response = fixture.post("/api/v1/scrape", json!({
///         "type": "movie", "title": "Example", "year": 2020
///     })).await;
///
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock searcher - configure the best torrent
    pub searcher: Arc<MockSearcher>,
    /// Mock debrid client - configure the resolved streams
    pub debrid: Arc<MockDebridClient>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub fn new() -> Self {
        let searcher = Arc::new(MockSearcher::new());
        let debrid = Arc::new(MockDebridClient::new());

        let config = Config {
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            http: HttpConfig::default(),
            jackett: JackettConfig {
                url: "http://jackett.test:9117".to_string(),
                api_key: "jackett-secret".to_string(),
            },
            real_debrid: RealDebridConfig {
                api_token: Some("rd-secret".to_string()),
                ..Default::default()
            },
        };

        let scraper = RealDebridScraper::new(
            Arc::clone(&searcher) as Arc<dyn Searcher>,
            Arc::clone(&debrid) as Arc<dyn DebridClient>,
        );
        let state = Arc::new(AppState::new(config, scraper, reqwest::Client::new()));

        Self {
            router: create_router(state),
            searcher,
            debrid,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, Body::empty(), None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request(
            "POST",
            path,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.request(
            "POST",
            path,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    /// GET a path and return the body as text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
