//! CLI error type

use std::path::PathBuf;
use thiserror::Error;

use crate::batch::BatchError;
use crate::import::SchemaError;
use crate::models::FieldError;
use crate::session::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            CliError::Field(err) => err.user_message(),
            CliError::Schema(err) => err.user_message(),
            CliError::Config(err) => err.user_message(),
            CliError::FileReadError(path, reason) => format!(
                "Failed to read {}: {reason}\n\nHint: check that the file exists, or pass '-' to read stdin.",
                path.display()
            ),
            _ => self.to_string(),
        }
    }
}
