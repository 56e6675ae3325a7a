use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Message shown to callers for any failure that is not their fault.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Outcome of asking the text-generation collaborator for structured output.
///
/// None of these reach an HTTP caller: every site that can produce one
/// substitutes deterministic fallback content instead.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("text-generation collaborator is not configured")]
    Unavailable,

    #[error("collaborator response did not match the expected schema: {0}")]
    MalformedResponse(String),

    #[error("collaborator call failed: {0}")]
    CallFailed(String),
}

impl From<LlmError> for UpstreamError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => UpstreamError::MalformedResponse(e.to_string()),
            LlmError::EmptyContent => {
                UpstreamError::MalformedResponse("LLM returned empty content".to_string())
            }
            other => UpstreamError::CallFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let (status, body) = body_json(AppError::Validation("no file".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "no file");
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        let (status, body) =
            body_json(AppError::Internal(anyhow::anyhow!("redis exploded"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_parse_failure_is_malformed_response() {
        let parse_err = serde_json::from_str::<Value>("not json").unwrap_err();
        let upstream: UpstreamError = LlmError::Parse(parse_err).into();
        assert!(matches!(upstream, UpstreamError::MalformedResponse(_)));
    }

    #[test]
    fn test_exhausted_rate_limit_is_call_failure() {
        let upstream: UpstreamError = LlmError::Api {
            status: 429,
            message: "rate_limit_error".to_string(),
        }
        .into();
        assert!(matches!(upstream, UpstreamError::CallFailed(_)));
    }
}
