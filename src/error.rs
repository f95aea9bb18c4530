//! Error types for the speech service
//!
//! Provides unified error handling using thiserror. The cache itself is
//! infallible; these errors come from request validation and from the
//! synthesis and playback collaborators.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Speech Error Enum ==
/// Unified error type for the speech service.
#[derive(Error, Debug)]
pub enum SpeechError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Tool name not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The synthesis engine failed to produce samples
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    /// The audio output could not play the samples
    #[error("Playback failed: {0}")]
    Playback(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for SpeechError {
    fn into_response(self) -> Response {
        let status = match &self {
            SpeechError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SpeechError::UnknownTool(_) => StatusCode::NOT_FOUND,
            SpeechError::Synthesis(_) => StatusCode::BAD_GATEWAY,
            SpeechError::Playback(_) => StatusCode::SERVICE_UNAVAILABLE,
            SpeechError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<tokio::task::JoinError> for SpeechError {
    fn from(err: tokio::task::JoinError) -> Self {
        SpeechError::Internal(format!("blocking task failed: {err}"))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the speech service.
pub type Result<T> = std::result::Result<T, SpeechError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_display() {
        let err = SpeechError::InvalidRequest("text cannot be empty".to_string());
        assert_eq!(err.to_string(), "Invalid request: text cannot be empty");
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (SpeechError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (SpeechError::UnknownTool("x".into()), StatusCode::NOT_FOUND),
            (SpeechError::Synthesis("x".into()), StatusCode::BAD_GATEWAY),
            (SpeechError::Playback("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (SpeechError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = SpeechError::UnknownTool("weather".into()).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "Unknown tool: weather");
    }
}
