/// Generative text proxy
///
/// Forwards a prompt to Gemini `generateContent`, with the server-held key
/// in the query string.
///
/// # Endpoint
///
/// ```text
/// POST /api/gemini
/// Content-Type: application/json
///
/// { "prompt": "Generate a playlist..." }
/// ```
///
/// # Responses
///
/// - `200 OK`: Gemini's JSON body verbatim, including error payloads
/// - `200 OK` with no body: OPTIONS pre-flight
/// - `400 Bad Request`: `prompt` missing
/// - `405 Method Not Allowed`: any other method
/// - `500 Internal Server Error`: key not configured, or the upstream call
///   failed

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::{check_method, parse_body, MethodGate, Preflight},
};
use axum::{
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use validator::Validate;

/// Text generation request
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Prompt text
    #[validate(
        required(message = "Prompt is required"),
        length(min = 1, message = "Prompt is required")
    )]
    pub prompt: Option<String>,
}

/// Text generation handler
pub async fn generate(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    if check_method(&method, Preflight::Allowed)? == MethodGate::Preflight {
        return Ok(StatusCode::OK.into_response());
    }

    let api_key = state
        .config
        .credentials
        .gemini_api_key()
        .ok_or_else(|| ApiError::NotConfigured("API key not configured".to_string()))?;

    let request: GenerateRequest = parse_body(&headers, body, ApiError::InternalError)?;
    request.validate()?;
    let prompt = request.prompt.unwrap_or_default();

    let upstream = state
        .gemini
        .generate_content(api_key, &prompt)
        .await
        .map_err(|e| ApiError::InternalError(format!("Gemini API error: {}", e)))?;

    tracing::info!(upstream_status = upstream.status, "Gemini request completed");

    Ok(Json(upstream.body).into_response())
}
