/// API route handlers
///
/// One handler per upstream, plus the health check:
///
/// - `health`: Liveness endpoint
/// - `audd`: Audio recognition proxy
/// - `gemini`: Generative text proxy
/// - `spotify_token`: OAuth token exchange and refresh proxy
///
/// Every proxy handler follows the same order of checks, and nothing
/// reaches the upstream unless all of them pass:
///
/// ```text
/// 1. method      OPTIONS -> 200 empty (where supported), non-POST -> 405
/// 2. credentials missing secret -> 500
/// 3. body        missing field -> 400
/// 4. upstream    exactly one request
/// ```

pub mod audd;
pub mod gemini;
pub mod health;
pub mod spotify_token;

use crate::error::{ApiError, ApiResult};
use axum::{
    extract::rejection::BytesRejection,
    http::{header, HeaderMap, Method, StatusCode},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;

/// Whether a handler answers `OPTIONS` itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Preflight {
    Allowed,
    Rejected,
}

/// Result of the method check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodGate {
    /// POST: continue with the request
    Proceed,

    /// OPTIONS on a handler that allows it: answer 200 with no body
    Preflight,
}

pub(crate) fn check_method(method: &Method, preflight: Preflight) -> ApiResult<MethodGate> {
    if *method == Method::OPTIONS && preflight == Preflight::Allowed {
        return Ok(MethodGate::Preflight);
    }

    if *method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    Ok(MethodGate::Proceed)
}

/// Parses a request body as JSON, or as a URL-encoded form when the
/// request says so
///
/// An empty body is read as `{}` so the handler reports the missing fields.
/// A body over the route's size limit is a 413. Anything else that cannot
/// be read or deserialized is an internal failure, reported the way the
/// calling handler reports every other unexpected error.
pub(crate) fn parse_body<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
    on_error: fn(String) -> ApiError,
) -> ApiResult<T> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge("Request body too large".to_string())
        } else {
            on_error(format!("Failed to read request body: {}", rejection.body_text()))
        }
    })?;

    if is_form(headers) {
        return serde_urlencoded::from_bytes(&body)
            .map_err(|e| on_error(format!("Invalid request body: {}", e)));
    }

    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &body
    };

    serde_json::from_slice(raw).map_err(|e| on_error(format!("Invalid request body: {}", e)))
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
