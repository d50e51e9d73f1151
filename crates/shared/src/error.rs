//! Application-wide error types.
//!
//! Engine-specific errors live next to their engines in `diagna-core`.
//! `AppError` is the coarse taxonomy used at crate boundaries and in the
//! binaries: validation, state conflict, authorization, referential
//! integrity, not-found, and infrastructure failures.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input (e.g., unbalanced journal entry).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Illegal state transition (e.g., double-approval).
    #[error("State conflict: {0}")]
    StateConflict(String),

    /// Actor lacks the required threshold or role.
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Cross-entity reference mismatch.
    #[error("Referential error: {0}")]
    Referential(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Referential(_) => 400,
            Self::Authorization(_) => 403,
            Self::NotFound(_) => 404,
            Self::StateConflict(_) => 409,
            Self::Configuration(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::StateConflict(_) => "STATE_CONFLICT",
            Self::Authorization(_) => "AUTHORIZATION_ERROR",
            Self::Referential(_) => "REFERENTIAL_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
