/// Spotify token exchange and refresh proxy
///
/// Performs the OAuth token operations that require the client secret, so
/// the secret never ships with the client application.
///
/// # Endpoint
///
/// ```text
/// POST /api/spotify-token
/// Content-Type: application/json
/// ```
///
/// The same fields may be sent as `application/x-www-form-urlencoded`.
///
/// Authorization code exchange (PKCE):
///
/// ```json
/// {
///   "grant_type": "authorization_code",
///   "code": "auth_code_from_spotify",
///   "redirect_uri": "https://example.com/callback/",
///   "code_verifier": "pkce_code_verifier"
/// }
/// ```
///
/// Token refresh:
///
/// ```json
/// { "grant_type": "refresh_token", "refresh_token": "user_refresh_token" }
/// ```
///
/// # Responses
///
/// - `200 OK`: token response from Spotify
/// - `200 OK` with no body: OPTIONS pre-flight
/// - `4xx/5xx`: Spotify's own status and JSON body, relayed unchanged
/// - `400 Bad Request`: missing `grant_type`, missing grant fields, or an
///   unsupported grant type
/// - `405 Method Not Allowed`: any other method
/// - `500 Internal Server Error`: client credentials not configured, or
///   `{"error":"Internal server error","message":...}` when the call failed

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{check_method, parse_body, MethodGate, Preflight},
};
use aiproxy_shared::models::token_grant::TokenRequest;
use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;

/// Token exchange handler
pub async fn exchange_token(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    if check_method(&method, Preflight::Allowed)? == MethodGate::Preflight {
        return Ok(StatusCode::OK.into_response());
    }

    let client = state.config.credentials.spotify_client().ok_or_else(|| {
        ApiError::NotConfigured("Spotify credentials not configured".to_string())
    })?;

    let request: TokenRequest = parse_body(&headers, body, ApiError::InternalErrorDetailed)?;
    let grant = request.into_grant()?;

    tracing::info!(grant_type = grant.grant_type(), "Processing Spotify token request");

    let upstream = state
        .spotify
        .request_token(&grant, client)
        .await
        .map_err(|e| ApiError::InternalErrorDetailed(e.to_string()))?;

    if upstream.is_success() {
        tracing::info!(grant_type = grant.grant_type(), "Spotify token operation successful");
        return Ok((StatusCode::OK, Json(upstream.body)).into_response());
    }

    // Error payloads from the token endpoint carry error codes only, never tokens
    tracing::warn!(
        grant_type = grant.grant_type(),
        upstream_status = upstream.status,
        upstream_error = %upstream.body,
        "Spotify token operation failed"
    );

    let status = StatusCode::from_u16(upstream.status).map_err(|e| {
        ApiError::InternalErrorDetailed(format!("Invalid upstream status: {}", e))
    })?;

    Ok((status, Json(upstream.body)).into_response())
}
