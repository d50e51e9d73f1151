//! Error types for cash reconciliation.

use thiserror::Error;

/// Errors that can occur during cash reconciliation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReconciliationError {
    /// The deposit amount must be positive.
    #[error("Deposit amount must be greater than zero")]
    AmountNotPositive,

    /// The deposit has already been verified and is immutable.
    #[error("Deposit has already been verified")]
    AlreadyVerified,

    /// A rejection requires a reason.
    #[error("A rejection reason is required")]
    RejectionReasonRequired,

    /// The deposit was not found.
    #[error("Bank deposit not found")]
    DepositNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl ReconciliationError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::DepositNotFound => "DEPOSIT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code a transport layer should map this to.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::AmountNotPositive | Self::RejectionReasonRequired => 400,
            Self::DepositNotFound => 404,
            Self::AlreadyVerified => 409,
            Self::Database(_) => 500,
        }
    }
}
