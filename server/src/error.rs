//! Errors surfaced to HTTP callers.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gleif_core::{RegistryError, ValidationError};
use serde_json::json;
use thiserror::Error;

pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

/// Every handler failure, rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed path identifier.
    #[error("{0}")]
    BadRequest(String),

    /// Query parameters that failed validation.
    #[error("{0}")]
    Unprocessable(String),

    /// Upstream or runtime failure. The cause is logged, never returned.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::warn!(error = %err, "rejected request");
        match err {
            ValidationError::InvalidLei(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Unprocessable(err.to_string()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection, "rejected path");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection, "rejected query string");
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match &err {
            RegistryError::Upstream { status, .. } => {
                tracing::error!(status, error = %err, "registry returned an error")
            }
            RegistryError::Transport(_) | RegistryError::Deserialization(_) => {
                tracing::error!(error = %err, "registry request failed")
            }
        }
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lei_is_bad_request() {
        let err = ApiError::from(ValidationError::InvalidLei("123".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Invalid LEI format"));
    }

    #[test]
    fn other_validation_errors_are_unprocessable() {
        for v in [
            ValidationError::InvalidPage("0".into()),
            ValidationError::InvalidSize {
                value: "1000".into(),
                max: 200,
            },
            ValidationError::MalformedFilterKey("filter[]".into()),
            ValidationError::MissingParameter("q"),
        ] {
            assert_eq!(ApiError::from(v).status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    #[test]
    fn registry_errors_hide_their_cause() {
        let err = ApiError::from(RegistryError::Upstream {
            status: 503,
            body: "secret upstream detail".into(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");

        let err = ApiError::from(RegistryError::Transport("connection refused".into()));
        assert_eq!(err.to_string(), "Internal server error");
    }
}
