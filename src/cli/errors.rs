//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero exit code.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StorageError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage client could not be constructed
    #[error("storage setup failed: {0}")]
    Storage(#[from] StorageError),

    /// Runtime or socket failure
    #[error("server failed: {0}")]
    Io(#[from] io::Error),

    /// Output encoding failure
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "DATAGATE_CLI_CONFIG_ERROR",
            CliError::Storage(_) => "DATAGATE_CLI_STORAGE_ERROR",
            CliError::Io(_) => "DATAGATE_CLI_IO_ERROR",
            CliError::Output(_) => "DATAGATE_CLI_OUTPUT_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
