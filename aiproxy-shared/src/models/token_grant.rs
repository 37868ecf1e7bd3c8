//! OAuth token grant model
//!
//! The token endpoint accepts exactly two grant types. A request body is
//! turned into a [`TokenGrant`] before any upstream call is made, so every
//! missing field or unsupported grant type is reported to the caller
//! without contacting the OAuth provider.
//!
//! # Grant Types
//!
//! ```text
//! authorization_code  requires code, redirect_uri, code_verifier
//! refresh_token       requires refresh_token
//! ```
//!
//! # Example
//!
//! ```
//! use aiproxy_shared::credentials::ClientCredentials;
//! use aiproxy_shared::models::token_grant::TokenRequest;
//!
//! let request: TokenRequest = serde_json::from_str(
//!     r#"{"grant_type":"refresh_token","refresh_token":"abc"}"#,
//! ).unwrap();
//! let grant = request.into_grant().unwrap();
//!
//! let client = ClientCredentials { client_id: "id", client_secret: "secret" };
//! assert_eq!(grant.form_params(client)[0], ("grant_type", "refresh_token"));
//! ```

use crate::credentials::ClientCredentials;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub const AUTHORIZATION_CODE: &str = "authorization_code";
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Grant validation errors
///
/// The display strings are returned verbatim to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrantError {
    #[error("grant_type is required")]
    MissingGrantType,

    #[error("code, redirect_uri, and code_verifier are required for authorization_code grant")]
    MissingAuthorizationCodeFields,

    #[error("refresh_token is required for refresh_token grant")]
    MissingRefreshToken,

    #[error("Unsupported grant_type: {0}")]
    UnsupportedGrantType(String),
}

/// Token request body as sent by the client
///
/// Every field is optional at the parsing stage; which ones are required
/// depends on `grant_type`.
#[derive(Default, Deserialize)]
pub struct TokenRequest {
    pub grant_type: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub code_verifier: Option<String>,
    pub refresh_token: Option<String>,
}

/// A validated token grant, ready to be sent upstream
#[derive(Clone, PartialEq, Eq)]
pub enum TokenGrant {
    /// Exchange an authorization code (PKCE flow)
    AuthorizationCode {
        code: String,
        redirect_uri: String,
        code_verifier: String,
    },

    /// Obtain a new access token from a refresh token
    RefreshToken { refresh_token: String },
}

impl TokenRequest {
    /// Validates the request and selects the grant
    ///
    /// # Errors
    ///
    /// Returns a [`GrantError`] naming the missing field(s) or the
    /// unsupported grant type. Empty strings count as missing.
    pub fn into_grant(self) -> Result<TokenGrant, GrantError> {
        let grant_type = present(self.grant_type).ok_or(GrantError::MissingGrantType)?;

        match grant_type.as_str() {
            AUTHORIZATION_CODE => match (
                present(self.code),
                present(self.redirect_uri),
                present(self.code_verifier),
            ) {
                (Some(code), Some(redirect_uri), Some(code_verifier)) => {
                    Ok(TokenGrant::AuthorizationCode {
                        code,
                        redirect_uri,
                        code_verifier,
                    })
                }
                _ => Err(GrantError::MissingAuthorizationCodeFields),
            },
            REFRESH_TOKEN => present(self.refresh_token)
                .map(|refresh_token| TokenGrant::RefreshToken { refresh_token })
                .ok_or(GrantError::MissingRefreshToken),
            _ => Err(GrantError::UnsupportedGrantType(grant_type)),
        }
    }
}

impl TokenGrant {
    /// The `grant_type` value sent upstream
    pub fn grant_type(&self) -> &'static str {
        match self {
            TokenGrant::AuthorizationCode { .. } => AUTHORIZATION_CODE,
            TokenGrant::RefreshToken { .. } => REFRESH_TOKEN,
        }
    }

    /// Form parameters for the token endpoint, in wire order
    pub fn form_params<'a>(&'a self, client: ClientCredentials<'a>) -> Vec<(&'static str, &'a str)> {
        match self {
            TokenGrant::AuthorizationCode {
                code,
                redirect_uri,
                code_verifier,
            } => vec![
                ("grant_type", AUTHORIZATION_CODE),
                ("code", code.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("client_id", client.client_id),
                ("client_secret", client.client_secret),
                ("code_verifier", code_verifier.as_str()),
            ],
            TokenGrant::RefreshToken { refresh_token } => vec![
                ("grant_type", REFRESH_TOKEN),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", client.client_id),
                ("client_secret", client.client_secret),
            ],
        }
    }
}

// Codes and refresh tokens belong to end users; keep them out of logs.
impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("grant_type", &self.grant_type())
            .finish_non_exhaustive()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> TokenRequest {
        serde_json::from_value(body).unwrap()
    }

    const CLIENT: ClientCredentials<'static> = ClientCredentials {
        client_id: "client-id",
        client_secret: "client-secret",
    };

    #[test]
    fn test_missing_grant_type() {
        let err = request(json!({})).into_grant().unwrap_err();
        assert_eq!(err, GrantError::MissingGrantType);

        let err = request(json!({ "grant_type": "" })).into_grant().unwrap_err();
        assert_eq!(err, GrantError::MissingGrantType);
    }

    #[test]
    fn test_authorization_code_grant() {
        let grant = request(json!({
            "grant_type": "authorization_code",
            "code": "auth-code",
            "redirect_uri": "https://example.com/callback",
            "code_verifier": "verifier"
        }))
        .into_grant()
        .unwrap();

        assert_eq!(grant.grant_type(), "authorization_code");
        assert_eq!(
            grant.form_params(CLIENT),
            vec![
                ("grant_type", "authorization_code"),
                ("code", "auth-code"),
                ("redirect_uri", "https://example.com/callback"),
                ("client_id", "client-id"),
                ("client_secret", "client-secret"),
                ("code_verifier", "verifier"),
            ]
        );
    }

    #[test]
    fn test_authorization_code_requires_every_field() {
        let complete = json!({
            "grant_type": "authorization_code",
            "code": "auth-code",
            "redirect_uri": "https://example.com/callback",
            "code_verifier": "verifier"
        });

        for field in ["code", "redirect_uri", "code_verifier"] {
            let mut body = complete.clone();
            body.as_object_mut().unwrap().remove(field);

            let err = request(body).into_grant().unwrap_err();
            assert_eq!(err, GrantError::MissingAuthorizationCodeFields, "field: {}", field);
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_refresh_token_grant() {
        let grant = request(json!({ "grant_type": "refresh_token", "refresh_token": "abc" }))
            .into_grant()
            .unwrap();

        assert_eq!(
            grant.form_params(CLIENT),
            vec![
                ("grant_type", "refresh_token"),
                ("refresh_token", "abc"),
                ("client_id", "client-id"),
                ("client_secret", "client-secret"),
            ]
        );
    }

    #[test]
    fn test_refresh_token_required() {
        let err = request(json!({ "grant_type": "refresh_token", "refresh_token": "" }))
            .into_grant()
            .unwrap_err();
        assert_eq!(err, GrantError::MissingRefreshToken);
    }

    #[test]
    fn test_unsupported_grant_type() {
        let err = request(json!({ "grant_type": "bogus" })).into_grant().unwrap_err();
        assert_eq!(err, GrantError::UnsupportedGrantType("bogus".to_string()));
        assert_eq!(err.to_string(), "Unsupported grant_type: bogus");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let grant = TokenGrant::RefreshToken {
            refresh_token: "very-private".to_string(),
        };
        let debug = format!("{:?}", grant);
        assert!(debug.contains("refresh_token"));
        assert!(!debug.contains("very-private"));
    }
}
