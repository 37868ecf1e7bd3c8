//! AudD audio recognition client
//!
//! Sends base64 audio as a multipart form together with the server-held
//! API token:
//!
//! ```text
//! POST https://api.audd.io/
//! Content-Type: multipart/form-data
//!
//! api_token=<token>
//! audio=<base64 audio>
//! ```

use super::{read_json, UpstreamError, UpstreamResponse};
use reqwest::multipart::Form;
use reqwest::Client;

/// AudD API client
#[derive(Debug, Clone)]
pub struct AuddClient {
    http: Client,
    endpoint: String,
}

impl AuddClient {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.audd.io/";

    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Submits audio for recognition
    ///
    /// The upstream's JSON body is returned whatever its status; AudD
    /// reports failures inside the payload.
    pub async fn recognize(
        &self,
        api_token: &str,
        audio: &str,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let form = Form::new()
            .text("api_token", api_token.to_owned())
            .text("audio", audio.to_owned());

        tracing::debug!(endpoint = %self.endpoint, audio_len = audio.len(), "Sending AudD recognition request");

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(UpstreamError::request)?;

        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::http_client;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_recognize_sends_multipart_form() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_string_contains("name=\"api_token\""))
            .and(body_string_contains("audd-token"))
            .and(body_string_contains("name=\"audio\""))
            .and(body_string_contains("QUJD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "result": { "title": "Song" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AuddClient::new(http_client().unwrap(), format!("{}/", mock_server.uri()));
        let response = client.recognize("audd-token", "QUJD").await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body["result"]["title"], "Song");

        let requests = mock_server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[tokio::test]
    async fn test_recognize_rejects_non_json_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = AuddClient::new(http_client().unwrap(), mock_server.uri());
        let err = client.recognize("audd-token", "QUJD").await.unwrap_err();

        assert!(matches!(err, UpstreamError::Decode(_)));
    }
}
