/// Audio recognition proxy
///
/// Forwards base64 audio to AudD with the server-held API token.
///
/// # Endpoint
///
/// ```text
/// POST /api/audd
/// Content-Type: application/json
///
/// { "audio": "<base64 audio>" }
/// ```
///
/// # Responses
///
/// - `200 OK`: AudD's JSON body verbatim. AudD reports recognition failures
///   inside the payload, and those payloads are relayed at 200 as well.
/// - `400 Bad Request`: `audio` missing
/// - `405 Method Not Allowed`: any method other than POST, including OPTIONS
/// - `413 Payload Too Large`: body over `API_BODY_LIMIT_BYTES`
/// - `500 Internal Server Error`: token not configured, or the upstream call
///   failed

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{check_method, parse_body, Preflight},
};
use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use validator::Validate;

/// Audio recognition request
#[derive(Debug, Deserialize, Validate)]
pub struct RecognizeRequest {
    /// Base64 encoded audio
    #[validate(
        required(message = "Audio data is required"),
        length(min = 1, message = "Audio data is required")
    )]
    pub audio: Option<String>,
}

/// Audio recognition handler
pub async fn recognize(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    check_method(&method, Preflight::Rejected)?;

    let api_token = state
        .config
        .credentials
        .audd_api_key()
        .ok_or_else(|| ApiError::NotConfigured("API key not configured".to_string()))?;

    let request: RecognizeRequest = parse_body(&headers, body, ApiError::InternalError)?;
    request.validate()?;
    let audio = request.audio.unwrap_or_default();

    let upstream = state
        .audd
        .recognize(api_token, &audio)
        .await
        .map_err(|e| ApiError::InternalError(format!("AudD API error: {}", e)))?;

    tracing::info!(upstream_status = upstream.status, "AudD request completed");

    Ok(Json(upstream.body).into_response())
}
