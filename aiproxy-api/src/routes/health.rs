/// Health check endpoint
///
/// Static liveness check. No upstream is contacted and no configuration is
/// consulted, so this endpoint cannot fail.
///
/// # Endpoint
///
/// ```text
/// POST /api/health   (any method is accepted)
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-01-04T12:00:00.000Z",
///   "service": "spotify-ai-proxy"
/// }
/// ```

use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "spotify-ai-proxy";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Current time, ISO 8601 with millisecond precision
    pub timestamp: String,

    /// Service name
    pub service: String,
}

/// Health check handler
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;

        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "spotify-ai-proxy");
        assert!(response.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&response.timestamp).is_ok());
    }
}
