use thiserror::Error;

/// Application-wide error type. The rule engine itself is total over string
/// input, so errors only surface from catalog loading and host-side plumbing.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents data validation errors (e.g., a malformed catalog entry).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unreadable catalog file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
