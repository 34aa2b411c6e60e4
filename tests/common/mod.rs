//! Common test utilities and fixtures
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`; no
//! external services are required.

use axum::{
    Extension, Router,
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::sync::{Arc, Once};
use tower::ServiceExt;

use geogate::{
    api::{capabilities, collections, conformance, landing},
    catalog::{CollectionEntry, MemoryCatalog},
    config::{Config, FeaturesConfig},
};

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("geogate=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const BASE_URL: &str = "http://localhost:8080/ogc/features";

/// A test application with an in-process router and seeded catalog
pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<MemoryCatalog>,
    pub config: Arc<Config>,
}

impl TestApp {
    /// Two collections in `ns1`, one in `ns2`, maxFeatures = 1000.
    pub fn new() -> Self {
        Self::with_max_features(1000)
    }

    pub fn with_max_features(max_features: i64) -> Self {
        Self::with_catalog(
            vec![
                CollectionEntry::new("ns1", "A").with_title("Collection A"),
                CollectionEntry::new("ns1", "B").with_title("Collection B"),
                CollectionEntry::new("ns2", "C").with_title("Collection C"),
            ],
            max_features,
        )
    }

    pub fn with_catalog(entries: Vec<CollectionEntry>, max_features: i64) -> Self {
        init_logging();

        let config = Arc::new(Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            base_url: BASE_URL.to_string(),
            features: FeaturesConfig { max_features },
            collections: entries.clone(),
        });

        let catalog = Arc::new(MemoryCatalog::new(entries));

        let router = Router::new()
            .merge(landing::routes())
            .merge(conformance::routes())
            .merge(collections::routes(catalog.clone()))
            .merge(capabilities::routes(catalog.clone()))
            .layer(Extension(config.clone()));

        Self {
            router,
            catalog,
            config,
        }
    }

    /// Make a GET request to the test app
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Make a GET request with an Accept header
    pub async fn get_with_accept(&self, uri: &str, accept: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Send a request to the router
    async fn send(&self, request: Request) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        TestResponse::from_response(response).await
    }
}

/// A test response with convenient methods for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the response body as a string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Parse the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON")
    }

    /// Parse the response body as YAML
    pub fn yaml<T: DeserializeOwned>(&self) -> T {
        serde_yaml::from_slice(&self.body).expect("Failed to parse YAML")
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    }

    /// Assert the status code
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    /// Assert content type header
    pub fn assert_content_type(&self, expected: &str) -> &Self {
        let content_type = self.header("content-type").unwrap_or_default();
        assert!(
            content_type.starts_with(expected),
            "Expected content type starting with {}, got {}",
            expected,
            content_type
        );
        self
    }
}

/// Assert that a response has a specific link relation
pub fn assert_has_link(links: &[serde_json::Value], rel: &str) -> bool {
    links.iter().any(|link| {
        link.get("rel")
            .and_then(|r| r.as_str())
            .map(|r| r == rel)
            .unwrap_or(false)
    })
}
