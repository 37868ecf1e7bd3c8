//! # AI Proxy API Server
//!
//! Serves the credentialed pass-through endpoints used by the client
//! application:
//!
//! - `POST /api/health`
//! - `POST /api/audd`
//! - `POST /api/gemini`
//! - `POST /api/spotify-token`
//!
//! ## Usage
//!
//! ```bash
//! AUDD_API_KEY=... GEMINI_API_KEY=... \
//! SPOTIFY_CLIENT_ID=... SPOTIFY_CLIENT_SECRET=... \
//! cargo run -p aiproxy-api
//! ```

use aiproxy_api::{
    app::{build_router, AppState},
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("AI proxy server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    for var in config.credentials.missing_vars() {
        tracing::warn!(variable = var, "Credential not configured; dependent endpoint will return 500");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aiproxy_api=debug,aiproxy_shared=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
