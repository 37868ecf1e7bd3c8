/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `ENVIRONMENT`: `production` enables HSTS (default: development)
/// - `API_BODY_LIMIT_BYTES`: largest accepted audio request body
///   (default: 4.5 MiB)
/// - `AUDD_API_KEY`, `GEMINI_API_KEY`, `SPOTIFY_CLIENT_ID`,
///   `SPOTIFY_CLIENT_SECRET`: upstream credentials (all optional)
/// - `AUDD_API_URL`, `GEMINI_API_BASE_URL`, `GEMINI_MODEL`,
///   `SPOTIFY_TOKEN_URL`: upstream endpoint overrides
/// - `RUST_LOG`: Log level (default: debug for this crate)
///
/// A missing credential is not a startup error. Only the handler that needs
/// it answers with a configuration error.
///
/// # Example
///
/// ```no_run
/// use aiproxy_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use aiproxy_shared::credentials::Credentials;
use aiproxy_shared::upstream::{AuddClient, GeminiClient, SpotifyAccountsClient};
use std::env;

/// Default request body limit for audio uploads (4.5 MiB)
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 9 * 1024 * 1024 / 2;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Upstream endpoints
    pub upstream: UpstreamConfig,

    /// Server-held secrets
    pub credentials: Credentials,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Production mode (enables HSTS)
    pub production: bool,

    /// Largest accepted audio request body, in bytes
    pub body_limit_bytes: usize,
}

/// Upstream endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// AudD recognition endpoint
    pub audd_url: String,

    /// Gemini API base URL
    pub gemini_base_url: String,

    /// Gemini model name
    pub gemini_model: String,

    /// Spotify token endpoint
    pub spotify_token_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            production: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            audd_url: AuddClient::DEFAULT_ENDPOINT.to_string(),
            gemini_base_url: GeminiClient::DEFAULT_BASE_URL.to_string(),
            gemini_model: GeminiClient::DEFAULT_MODEL.to_string(),
            spotify_token_url: SpotifyAccountsClient::DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `API_PORT` is not a valid port number, or if
    /// `API_BODY_LIMIT_BYTES` is not a valid size.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = UpstreamConfig::default();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("API_PORT must be a valid port number: {}", e))?;

        let body_limit_bytes = match env::var("API_BODY_LIMIT_BYTES") {
            Ok(value) => value.parse::<usize>().map_err(|e| {
                anyhow::anyhow!("API_BODY_LIMIT_BYTES must be a size in bytes: {}", e)
            })?,
            Err(_) => DEFAULT_BODY_LIMIT_BYTES,
        };

        let production = env::var("ENVIRONMENT")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                production,
                body_limit_bytes,
            },
            upstream: UpstreamConfig {
                audd_url: env::var("AUDD_API_URL").unwrap_or(defaults.audd_url),
                gemini_base_url: env::var("GEMINI_API_BASE_URL").unwrap_or(defaults.gemini_base_url),
                gemini_model: env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
                spotify_token_url: env::var("SPOTIFY_TOKEN_URL").unwrap_or(defaults.spotify_token_url),
            },
            credentials: Credentials::from_env(),
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                ..ApiConfig::default()
            },
            upstream: UpstreamConfig::default(),
            credentials: Credentials::default().with_audd_api_key("audd-secret"),
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_default_upstreams() {
        let upstream = UpstreamConfig::default();
        assert_eq!(upstream.audd_url, "https://api.audd.io/");
        assert_eq!(upstream.gemini_model, "gemini-pro");
        assert_eq!(upstream.spotify_token_url, "https://accounts.spotify.com/api/token");
    }

    #[test]
    fn test_default_body_limit_exceeds_framework_default() {
        assert_eq!(ApiConfig::default().body_limit_bytes, 4_718_592);
        assert!(ApiConfig::default().body_limit_bytes > 2 * 1024 * 1024);
    }

    #[test]
    fn test_debug_does_not_leak_credentials() {
        let debug = format!("{:?}", test_config());
        assert!(!debug.contains("audd-secret"));
    }
}
