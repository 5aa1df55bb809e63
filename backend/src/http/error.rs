//! HTTP error handling and response types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Missing query parameter or unreadable body
    BadRequest {
        message: String,
        details: Option<String>,
    },
    /// Repository error; `NotFound` becomes 404, the rest 500
    Repository(RepositoryError),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest { message, details } => (
                StatusCode::BAD_REQUEST,
                ApiError {
                    details,
                    ..ApiError::new("BAD_REQUEST", message)
                },
            ),
            AppError::Repository(RepositoryError::NotFound { message, .. }) => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
            }
            AppError::Repository(e) => {
                // Database text stays in the logs.
                error!(error = %e, "Repository error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("REPOSITORY_ERROR", "An unexpected error occurred"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

/// Any body rejection (syntax, wrong field type, missing content type) is a 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }
    }
}
