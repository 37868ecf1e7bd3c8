/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use aiproxy_api::{app::AppState, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(config)?;
/// let app = aiproxy_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::NoStoreHeadersLayer, routes};
use aiproxy_shared::upstream::{
    http_client, AuddClient, GeminiClient, SpotifyAccountsClient, UpstreamError,
};
use axum::{extract::DefaultBodyLimit, routing::any, Router};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// The configuration is read-only for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, including credentials
    pub config: Arc<Config>,

    /// AudD client
    pub audd: AuddClient,

    /// Gemini client
    pub gemini: GeminiClient,

    /// Spotify accounts client
    pub spotify: SpotifyAccountsClient,
}

impl AppState {
    /// Creates application state with one HTTP client shared by all upstreams
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, UpstreamError> {
        let http = http_client()?;
        let upstream = &config.upstream;

        Ok(Self {
            audd: AuddClient::new(http.clone(), upstream.audd_url.clone()),
            gemini: GeminiClient::new(
                http.clone(),
                upstream.gemini_base_url.clone(),
                upstream.gemini_model.clone(),
            ),
            spotify: SpotifyAccountsClient::new(http, upstream.spotify_token_url.clone()),
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /api
/// ├── /health          # Liveness (any method)
/// ├── /audd            # Audio recognition (POST)
/// ├── /gemini          # Generative text (POST, OPTIONS)
/// └── /spotify-token   # OAuth token exchange/refresh (POST, OPTIONS)
/// ```
///
/// Routes accept any method; each handler decides which methods it serves
/// so rejected methods get a JSON 405 body. OPTIONS must reach the
/// handlers, so no CORS layer is installed. The audio route raises the
/// request body limit to `api.body_limit_bytes`.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. No-store response headers
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.api.body_limit_bytes;

    let api_routes = Router::new()
        .route("/health", any(routes::health::health_check))
        .route(
            "/audd",
            any(routes::audd::recognize).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/gemini", any(routes::gemini::generate))
        .route("/spotify-token", any(routes::spotify_token::exchange_token));

    let production = state.config.api.production;

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(NoStoreHeadersLayer::new(production))
        .with_state(state)
}
