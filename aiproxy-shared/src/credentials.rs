//! Server-held credentials for the proxied APIs
//!
//! Credentials are read once at startup and injected into the API server's
//! state. Every value is optional: a missing secret only disables the
//! handler that needs it, it never prevents the server from starting.
//!
//! # Environment Variables
//!
//! - `AUDD_API_KEY`: AudD audio recognition token
//! - `GEMINI_API_KEY`: Gemini generative text key
//! - `SPOTIFY_CLIENT_ID`: Spotify OAuth client id
//! - `SPOTIFY_CLIENT_SECRET`: Spotify OAuth client secret
//!
//! Empty values are treated as absent.
//!
//! # Example
//!
//! ```
//! use aiproxy_shared::credentials::Credentials;
//!
//! let credentials = Credentials::default().with_gemini_api_key("key");
//! assert_eq!(credentials.gemini_api_key(), Some("key"));
//! assert!(credentials.spotify_client().is_none());
//! ```

use std::env;
use std::fmt;

pub const AUDD_API_KEY_VAR: &str = "AUDD_API_KEY";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const SPOTIFY_CLIENT_ID_VAR: &str = "SPOTIFY_CLIENT_ID";
pub const SPOTIFY_CLIENT_SECRET_VAR: &str = "SPOTIFY_CLIENT_SECRET";

/// Bundle of every secret the proxy handlers may need
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    audd_api_key: Option<String>,
    gemini_api_key: Option<String>,
    spotify_client_id: Option<String>,
    spotify_client_secret: Option<String>,
}

/// Spotify OAuth client id and secret, borrowed from [`Credentials`]
#[derive(Clone, Copy)]
pub struct ClientCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

impl Credentials {
    /// Loads credentials from environment variables
    ///
    /// Loads a `.env` file first if one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            audd_api_key: non_empty_var(AUDD_API_KEY_VAR),
            gemini_api_key: non_empty_var(GEMINI_API_KEY_VAR),
            spotify_client_id: non_empty_var(SPOTIFY_CLIENT_ID_VAR),
            spotify_client_secret: non_empty_var(SPOTIFY_CLIENT_SECRET_VAR),
        }
    }

    pub fn with_audd_api_key(mut self, key: impl Into<String>) -> Self {
        self.audd_api_key = non_empty(key.into());
        self
    }

    pub fn with_gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = non_empty(key.into());
        self
    }

    pub fn with_spotify_client(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.spotify_client_id = non_empty(client_id.into());
        self.spotify_client_secret = non_empty(client_secret.into());
        self
    }

    /// AudD API token, if configured
    pub fn audd_api_key(&self) -> Option<&str> {
        self.audd_api_key.as_deref()
    }

    /// Gemini API key, if configured
    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    /// Spotify client id and secret
    ///
    /// Returns `None` unless both halves are configured.
    pub fn spotify_client(&self) -> Option<ClientCredentials<'_>> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(client_id), Some(client_secret)) => Some(ClientCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        }
    }

    /// Names of the environment variables that are not configured
    pub fn missing_vars(&self) -> Vec<&'static str> {
        [
            (AUDD_API_KEY_VAR, self.audd_api_key.is_none()),
            (GEMINI_API_KEY_VAR, self.gemini_api_key.is_none()),
            (SPOTIFY_CLIENT_ID_VAR, self.spotify_client_id.is_none()),
            (SPOTIFY_CLIENT_SECRET_VAR, self.spotify_client_secret.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("audd_api_key", &redacted(&self.audd_api_key))
            .field("gemini_api_key", &redacted(&self.gemini_api_key))
            .field("spotify_client_id", &redacted(&self.spotify_client_id))
            .field("spotify_client_secret", &redacted(&self.spotify_client_secret))
            .finish()
    }
}

impl fmt::Debug for ClientCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &"<redacted>")
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

fn redacted(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(non_empty)
}
