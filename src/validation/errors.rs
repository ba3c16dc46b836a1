//! # Validation Errors
//!
//! Error type returned by the request validators.

use thiserror::Error;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input rejected before it reaches storage
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body is not a JSON object, or the object has no keys
    #[error("empty or malformed payload")]
    MalformedPayload,

    /// A query parameter parsed but is outside its domain
    #[error("invalid query parameter {name}: {value}")]
    InvalidQueryParam { name: &'static str, value: String },

    /// Path segment is not a canonical UUID
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}
