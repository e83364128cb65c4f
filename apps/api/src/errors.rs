use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::matching::error::MatchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Model service error: {0}")]
    ModelService(String),

    #[error("Embedding store error: {0}")]
    EmbeddingStore(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::ModelService(msg) => {
                tracing::error!("Model service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_SERVICE_ERROR",
                    "A model service error occurred".to_string(),
                )
            }
            AppError::EmbeddingStore(msg) => {
                tracing::error!("Embedding store error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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

/// Maps matching-subsystem errors to HTTP responses: missing job or embedding
/// is a 404, malformed vectors are 422, model-service failures are 502, and
/// store failures are 500.
impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        match e {
            MatchError::JobNotFound(id) => AppError::NotFound(format!("Job {id} not found")),
            MatchError::EmbeddingNotFound(id) => {
                AppError::NotFound(format!("No stored embedding for job {id}"))
            }
            MatchError::DimensionMismatch { .. } | MatchError::DegenerateVector => {
                AppError::UnprocessableEntity(e.to_string())
            }
            MatchError::Summarization(_) | MatchError::Embedding(_) | MatchError::Timeout(_) => {
                AppError::ModelService(e.to_string())
            }
            MatchError::Storage(msg) => AppError::EmbeddingStore(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_job_not_found_maps_to_404() {
        assert_eq!(
            status_of(MatchError::JobNotFound(9).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MatchError::EmbeddingNotFound(9).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_vector_errors_map_to_422() {
        assert_eq!(
            status_of(MatchError::DegenerateVector.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(MatchError::DimensionMismatch { left: 2, right: 3 }.into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_model_failures_map_to_502() {
        assert_eq!(
            status_of(MatchError::Summarization("down".to_string()).into()),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(MatchError::Timeout(Duration::from_secs(30)).into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_storage_failure_maps_to_500() {
        assert_eq!(
            status_of(MatchError::Storage("disk".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
