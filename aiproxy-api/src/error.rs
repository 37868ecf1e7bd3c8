/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// Handlers return `Result<Response, ApiError>`; every failure is turned
/// into a JSON body of the form `{"error": "..."}` at this single boundary.
///
/// # Status Mapping
///
/// ```text
/// MethodNotAllowed       405  {"error":"Method not allowed"}
/// BadRequest             400  {"error":<message>}
/// PayloadTooLarge        413  {"error":<message>}
/// NotConfigured          500  {"error":<message>}
/// InternalError          500  {"error":"Failed to process request"}
/// InternalErrorDetailed  500  {"error":"Internal server error","message":<message>}
/// ```
///
/// # Example
///
/// ```
/// use aiproxy_api::error::{ApiError, ApiResult};
/// use axum::{response::{IntoResponse, Response}, Json};
/// use serde_json::json;
///
/// async fn handler(prompt: Option<String>) -> ApiResult<Response> {
///     let prompt = prompt.ok_or_else(|| ApiError::BadRequest("Prompt is required".to_string()))?;
///     Ok(Json(json!({ "prompt": prompt })).into_response())
/// }
/// ```

use aiproxy_shared::models::token_grant::GrantError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidationErrors;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Method not allowed (405)
    MethodNotAllowed,

    /// Bad request (400) - missing or invalid body fields
    BadRequest(String),

    /// Request body over the route's size limit (413)
    PayloadTooLarge(String),

    /// Required credential absent from configuration (500)
    NotConfigured(String),

    /// Internal server error (500), details logged only
    InternalError(String),

    /// Internal server error (500), message included in the body
    InternalErrorDetailed(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error
    pub error: String,

    /// Optional failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::NotConfigured(msg) => write!(f, "Not configured: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::InternalErrorDetailed(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                None,
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg, None),
            ApiError::NotConfigured(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process request".to_string(),
                    None,
                )
            }
            ApiError::InternalErrorDetailed(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(msg),
                )
            }
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

/// Convert body validation errors to a 400 naming the first failing field
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is required", field))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());

        ApiError::BadRequest(message)
    }
}

/// Convert OAuth grant errors to API errors
impl From<GrantError> for ApiError {
    fn from(err: GrantError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Prompt is required".to_string());
        assert_eq!(err.to_string(), "Bad request: Prompt is required");

        assert_eq!(ApiError::MethodNotAllowed.to_string(), "Method not allowed");
    }

    #[tokio::test]
    async fn test_method_not_allowed_response() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Method not allowed" })
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::InternalError("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Failed to process request" })
        );
    }

    #[tokio::test]
    async fn test_internal_error_detailed_includes_message() {
        let response =
            ApiError::InternalErrorDetailed("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({
                "error": "Internal server error",
                "message": "connection refused"
            })
        );
    }

    #[tokio::test]
    async fn test_payload_too_large_response() {
        let response = ApiError::PayloadTooLarge("Request body too large".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Request body too large" })
        );
    }

    #[test]
    fn test_grant_error_is_bad_request() {
        let err: ApiError = GrantError::UnsupportedGrantType("bogus".to_string()).into();
        match err {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Unsupported grant_type: bogus"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(required(message = "Sample is required"))]
        value: Option<String>,
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        let errors = Sample { value: None }.validate().unwrap_err();
        match ApiError::from(errors) {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Sample is required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
