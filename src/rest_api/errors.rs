//! # REST API Errors
//!
//! Every failure leaves the API as `{"success": false, "error": <message>}`
//! with a matching status code. Storage detail is logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StorageError;
use crate::validation::ValidationError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Storage step that failed, which picks the public message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageAction {
    Save,
    Fetch,
    Delete,
}

impl StorageAction {
    pub fn message(&self) -> &'static str {
        match self {
            StorageAction::Save => "Failed to save data",
            StorageAction::Fetch => "Failed to fetch data",
            StorageAction::Delete => "Failed to delete data",
        }
    }
}

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body missing, not JSON, or an empty object
    #[error("Invalid data format")]
    InvalidPayload(#[source] Option<ValidationError>),

    /// List query parameter out of range
    #[error("Invalid query parameters")]
    InvalidQuery(#[source] Option<ValidationError>),

    /// Path identifier is not a UUID
    #[error("Invalid ID format")]
    InvalidId(#[source] ValidationError),

    /// No record with the requested identifier
    #[error("Data not found")]
    NotFound,

    /// No route matched
    #[error("Not found")]
    RouteNotFound,

    /// Route exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage backend failed
    #[error("{}", .action.message())]
    Storage {
        action: StorageAction,
        #[source]
        source: StorageError,
    },

    /// Anything else
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn storage(action: StorageAction, source: StorageError) -> Self {
        ApiError::Storage { action, source }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,

            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self::new(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage { action, source } => {
                tracing::error!(action = ?action, error = %source, "storage call failed");
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error");
            }
            ApiError::InvalidPayload(Some(cause))
            | ApiError::InvalidQuery(Some(cause))
            | ApiError::InvalidId(cause) => {
                tracing::debug!(reason = %cause, "request rejected");
            }
            _ => {}
        }

        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
