//! Error types for agenda operations.

use thiserror::Error;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Agenda not found: {0}")]
    NotFound(String),

    #[error("Invalid import format: {0}")]
    Format(String),

    #[error("Image is too large ({size} bytes, max {max} bytes)")]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Not an image file: {0}")]
    NotAnImage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AgendaError {
    fn from(e: serde_json::Error) -> Self {
        AgendaError::Serialization(e.to_string())
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
