//! Crate-level error type.
//!
//! The scheduling core does not fail; errors arise only at the boundary
//! (input parsing, configuration, I/O).

use crate::validation::ValidationError;

/// Boundary error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for boundary operations.
pub type Result<T> = std::result::Result<T, Error>;
