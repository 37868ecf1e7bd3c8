//! Clients for the third-party APIs behind the proxy
//!
//! Each client wraps a shared `reqwest::Client` and a fixed endpoint, and
//! issues exactly one request per call. Nothing is retried and no timeout
//! is set beyond the HTTP client's defaults.
//!
//! - `audd`: AudD audio recognition (multipart form)
//! - `gemini`: Gemini generative text (JSON, key in query string)
//! - `spotify`: Spotify accounts token endpoint (URL-encoded form)
//!
//! Every client returns the upstream status together with its parsed JSON
//! body; deciding which status to answer the caller with is left to the
//! handler.

pub mod audd;
pub mod gemini;
pub mod spotify;

pub use audd::AuddClient;
pub use gemini::GeminiClient;
pub use spotify::SpotifyAccountsClient;

use serde_json::Value as JsonValue;
use thiserror::Error;

/// Upstream call errors
///
/// The wrapped `reqwest::Error` never carries the request URL, since the
/// Gemini key travels in the query string.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(reqwest::Error),

    /// Request could not be sent or no response arrived
    #[error("Upstream request failed: {0}")]
    Request(reqwest::Error),

    /// Response body was not valid JSON
    #[error("Upstream response could not be decoded: {0}")]
    Decode(reqwest::Error),
}

impl UpstreamError {
    fn request(err: reqwest::Error) -> Self {
        UpstreamError::Request(err.without_url())
    }

    fn decode(err: reqwest::Error) -> Self {
        UpstreamError::Decode(err.without_url())
    }
}

/// Status and JSON body returned by an upstream API
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    /// HTTP status code as sent by the upstream
    pub status: u16,

    /// Parsed response body
    pub body: JsonValue,
}

impl UpstreamResponse {
    /// Whether the upstream answered with a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Builds the HTTP client shared by every upstream client
///
/// The client's connection pool is the only resource shared across
/// requests.
pub fn http_client() -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .user_agent(concat!("aiproxy/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(UpstreamError::Client)
}

async fn read_json(response: reqwest::Response) -> Result<UpstreamResponse, UpstreamError> {
    let status = response.status().as_u16();
    let body = response
        .json::<JsonValue>()
        .await
        .map_err(UpstreamError::decode)?;

    Ok(UpstreamResponse { status, body })
}
