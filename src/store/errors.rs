//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Failures reported by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The request never produced a response
    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("storage backend returned {status}: {body}")]
    Backend { status: u16, body: String },

    /// The backend answered with something we could not read
    #[error("unexpected storage response: {0}")]
    Decode(String),

    /// Local backend state is unusable
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Decode(e.to_string())
    }
}
