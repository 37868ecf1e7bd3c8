//! Gemini generative text client
//!
//! ```text
//! POST {base}/v1/models/{model}:generateContent?key=<api key>
//! Content-Type: application/json
//!
//! {"contents":[{"parts":[{"text":"<prompt>"}]}]}
//! ```

use super::{read_json, UpstreamError, UpstreamResponse};
use reqwest::Client;
use serde::Serialize;

/// `generateContent` request body
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single-turn request with one text part
    pub fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        }
    }
}

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_MODEL: &'static str = "gemini-pro";

    pub fn new(http: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Endpoint URL without the key
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Generates content for a single prompt
    ///
    /// The upstream's JSON body is returned whatever its status.
    pub async fn generate_content(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let endpoint = self.endpoint();
        tracing::debug!(endpoint = %endpoint, prompt_len = prompt.len(), "Sending Gemini generateContent request");

        let response = self
            .http
            .post(endpoint)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(UpstreamError::request)?;

        read_json(response).await
    }
}
