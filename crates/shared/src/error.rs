//! Application-wide error types.

use thiserror::Error;

use crate::types::MoneyError;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Domain errors from the ledger engine convert into one of these so a host
/// transport can map them to a status code without knowing the engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (e.g., settlement already completed).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Forbidden(_) => 403,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Configuration(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
