/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A mock upstream server standing in for AudD, Gemini and Spotify
/// - App construction with injected credentials
/// - Request helpers returning status and parsed body

use aiproxy_api::app::{build_router, AppState};
use aiproxy_api::config::{ApiConfig, Config, UpstreamConfig};
use aiproxy_shared::credentials::Credentials;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use tower::Service as _;
use wiremock::MockServer;

pub const AUDD_TOKEN: &str = "test-audd-token";
pub const GEMINI_KEY: &str = "test-gemini-key";
pub const SPOTIFY_CLIENT_ID: &str = "test-client-id";
pub const SPOTIFY_CLIENT_SECRET: &str = "test-client-secret";

/// Test context containing the app and its mock upstream
pub struct TestContext {
    pub upstream: MockServer,
    pub app: axum::Router,
}

/// Response captured from the app
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parses the body as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Expected JSON body, got {:?}: {}",
                String::from_utf8_lossy(&self.body),
                e
            )
        })
    }
}

impl TestContext {
    /// Creates a context with every credential configured
    pub async fn new() -> Self {
        Self::with_credentials(all_credentials()).await
    }

    /// Creates a context with the given credentials
    pub async fn with_credentials(credentials: Credentials) -> Self {
        let upstream = MockServer::start().await;

        let config = Config {
            api: ApiConfig::default(),
            upstream: UpstreamConfig {
                audd_url: format!("{}/", upstream.uri()),
                gemini_base_url: upstream.uri(),
                gemini_model: "gemini-pro".to_string(),
                spotify_token_url: format!("{}/api/token", upstream.uri()),
            },
            credentials,
        };

        let state = AppState::new(config).unwrap();
        let app = build_router(state);

        TestContext { upstream, app }
    }

    /// Sends a request with an optional JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<serde_json::Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    /// Sends a prepared request
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Number of requests the mock upstream has received
    pub async fn upstream_calls(&self) -> usize {
        self.upstream.received_requests().await.unwrap().len()
    }
}

/// Credentials with every secret set
pub fn all_credentials() -> Credentials {
    Credentials::default()
        .with_audd_api_key(AUDD_TOKEN)
        .with_gemini_api_key(GEMINI_KEY)
        .with_spotify_client(SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET)
}
