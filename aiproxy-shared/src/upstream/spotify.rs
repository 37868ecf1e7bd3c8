//! Spotify accounts token endpoint client
//!
//! ```text
//! POST https://accounts.spotify.com/api/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=refresh_token&refresh_token=...&client_id=...&client_secret=...
//! ```

use super::{read_json, UpstreamError, UpstreamResponse};
use crate::credentials::ClientCredentials;
use crate::models::token_grant::TokenGrant;
use reqwest::Client;

/// Spotify accounts API client
#[derive(Debug, Clone)]
pub struct SpotifyAccountsClient {
    http: Client,
    token_url: String,
}

impl SpotifyAccountsClient {
    pub const DEFAULT_TOKEN_URL: &'static str = "https://accounts.spotify.com/api/token";

    pub fn new(http: Client, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
        }
    }

    /// Exchanges a grant for tokens
    ///
    /// Non-2xx answers are returned as `Ok` with the upstream status so the
    /// caller can relay them unchanged.
    pub async fn request_token(
        &self,
        grant: &TokenGrant,
        client: ClientCredentials<'_>,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&grant.form_params(client))
            .send()
            .await
            .map_err(UpstreamError::request)?;

        read_json(response).await
    }
}
