use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::schema::{ValidationError, Violation};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErrorDetails {
    pub code: i64,
    pub message: String,
    pub details: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResponseError {
    pub error: ErrorDetails,
}

/// Body of a 400 produced by a schema failure.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub error: String,
    pub details: Vec<Violation>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Malformed JSON body: {0}.")]
    MalformedJson(#[from] serde_json::Error),
    #[error("Unsupported content type: {0}.")]
    UnsupportedContentType(String),
    #[error("Failed to read request body: {0}.")]
    BodyRead(#[from] axum::Error),
    #[error("Invalid path parameters: {0}.")]
    PathRejection(#[from] PathRejection),
    #[error("Validated body missing from request extensions.")]
    MissingNormalizedBody,
    #[error("Normalized body does not match its model: {0}.")]
    NormalizedBody(serde_json::Error),
    #[error("No route matches {0}.")]
    RouteNotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, client_message, internal_details) = match &self {
            AppError::Validation(e) => {
                let body = ValidationFailure {
                    error: "Validation failed".to_string(),
                    details: e.violations().to_vec(),
                };
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            AppError::MalformedJson(e) => (
                StatusCode::BAD_REQUEST,
                "Malformed JSON in request body.",
                format!("JSON syntax error: {}", e),
            ),
            AppError::UnsupportedContentType(_) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content-Type header must be application/json.",
                self.to_string(),
            ),
            AppError::BodyRead(_) => (
                StatusCode::BAD_REQUEST,
                "Failed to read request body.",
                self.to_string(),
            ),
            AppError::MissingNormalizedBody | AppError::NormalizedBody(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong. Please try again later.",
                self.to_string(),
            ),
            AppError::RouteNotFound(_) => (
                StatusCode::NOT_FOUND,
                "Resource not found.",
                self.to_string(),
            ),
            AppError::PathRejection(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid path parameters.",
                e.to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!("{}", internal_details);
        }

        let error_body = Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": client_message,
                "details": internal_details,
            }
        }));

        (status, error_body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn validation_error_uses_flat_envelope() {
        let err = AppError::from(ValidationError::new(vec![Violation::new(
            "status",
            "Invalid enum value. Expected 'on-track' | 'behind' | 'ahead' | 'completed', received 'unknown'",
        )]));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let failure: ValidationFailure = serde_json::from_slice(&body).unwrap();
        assert_eq!(failure.error, "Validation failed");
        assert_eq!(failure.details.len(), 1);
        assert_eq!(failure.details[0].field, "status");
    }

    #[tokio::test]
    async fn upstream_errors_use_generic_envelope() {
        let parse = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let response = AppError::from(parse).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let envelope: ResponseError = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(envelope.error.message, "Malformed JSON in request body.");
    }
}
