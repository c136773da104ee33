use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::error::DomainError;

/// Standard JSON error body.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// HTTP status code
    pub code: u16,
    /// RFC3339 timestamp when the error occurred
    pub timestamp: String,
    /// Optional request ID for tracking
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            timestamp: chrono::Utc::now().to_rfc3339(),
            request_id: None,
        }
    }
}

/// REST-layer error; renders the standard JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ItemNotFound { .. } => ApiError::NotFound(e.to_string()),
            DomainError::Storage { .. } => {
                // Log the internal details but don't expose them to the client.
                tracing::error!(error = %e, "Storage failure");
                ApiError::Internal("An internal storage error occurred".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            ApiError::Internal(m) => {
                tracing::error!(error = %m, status = status.as_u16(), "request failed")
            }
            other => tracing::warn!(error = %other, status = status.as_u16(), "request failed"),
        }

        let body = ErrorResponse::new(self.to_string(), status.as_u16());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_maps_to_404() {
        let api: ApiError = DomainError::item_not_found(Uuid::nil()).into();
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_error_hides_details() {
        let api: ApiError = DomainError::storage("disk on fire: /secret/path").into();
        match &api {
            ApiError::Internal(m) => assert!(!m.contains("secret")),
            other => panic!("unexpected variant: {other:?}"),
        }
        let response = api.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
