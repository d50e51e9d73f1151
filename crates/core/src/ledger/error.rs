//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use super::types::JournalStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Journal entry must have at least 2 line items.
    #[error("Journal entry must have at least 2 line items")]
    InsufficientLineItems,

    /// Journal entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line item has both a debit and a credit amount.
    #[error("Line item for account {0} has both debit and credit set")]
    LineItemBothSides(Uuid),

    /// Line item has neither a debit nor a credit amount.
    #[error("Line item for account {0} has neither debit nor credit set")]
    LineItemEmpty(Uuid),

    /// Line item amount cannot be negative.
    #[error("Line item amount cannot be negative")]
    NegativeAmount,

    /// Description is required.
    #[error("Journal entry description is required")]
    DescriptionRequired,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(Uuid),

    /// Account code cannot change once the account has postings.
    #[error("Cannot change code for account {0} because it has postings")]
    AccountCodeImmutable(Uuid),

    /// Chart of accounts already initialized for the tenant.
    #[error("Chart of accounts already initialized for tenant {0}")]
    AlreadyInitialized(Uuid),

    // ========== Entry State Errors ==========
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Entry cannot be posted from its current status.
    #[error("Cannot post journal entry from status {0}")]
    NotPostable(JournalStatus),

    /// Entry is already posted (idempotent callers treat this as success).
    #[error("Journal entry is already posted")]
    AlreadyPosted,

    /// Entry is voided and cannot be changed.
    #[error("Journal entry is voided")]
    EntryVoided,

    /// Only posted entries can be voided.
    #[error("Can only void posted entries, current status is {0}")]
    CanOnlyVoidPosted(JournalStatus),

    /// Void reason is required but not provided.
    #[error("Void reason is required")]
    VoidReasonRequired,

    // ========== Concurrency / Storage Errors ==========
    /// Concurrent modification detected.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLineItems => "INSUFFICIENT_LINE_ITEMS",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::LineItemBothSides(_) => "LINE_ITEM_BOTH_SIDES",
            Self::LineItemEmpty(_) => "LINE_ITEM_EMPTY",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::DescriptionRequired => "DESCRIPTION_REQUIRED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountCodeImmutable(_) => "ACCOUNT_CODE_IMMUTABLE",
            Self::AlreadyInitialized(_) => "ALREADY_INITIALIZED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::NotPostable(_) => "NOT_POSTABLE",
            Self::AlreadyPosted => "ALREADY_POSTED",
            Self::EntryVoided => "ENTRY_VOIDED",
            Self::CanOnlyVoidPosted(_) => "CAN_ONLY_VOID_POSTED",
            Self::VoidReasonRequired => "VOID_REASON_REQUIRED",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InsufficientLineItems
            | Self::UnbalancedEntry { .. }
            | Self::LineItemBothSides(_)
            | Self::LineItemEmpty(_)
            | Self::NegativeAmount
            | Self::DescriptionRequired
            | Self::AccountInactive(_)
            | Self::AccountCodeImmutable(_)
            | Self::VoidReasonRequired => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,

            // 409 Conflict - state and concurrency errors
            Self::AlreadyInitialized(_)
            | Self::NotPostable(_)
            | Self::AlreadyPosted
            | Self::EntryVoided
            | Self::CanOnlyVoidPosted(_)
            | Self::ConcurrentModification => 409,

            // 500 Internal Server Error
            Self::Database(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debit: dec!(100),
                credit: dec!(50),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(
            LedgerError::InsufficientLineItems.error_code(),
            "INSUFFICIENT_LINE_ITEMS"
        );
        assert_eq!(LedgerError::AlreadyPosted.error_code(), "ALREADY_POSTED");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debit: dec!(1),
                credit: dec!(2),
            }
            .http_status_code(),
            400
        );
        assert_eq!(
            LedgerError::AccountNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::AlreadyInitialized(Uuid::nil()).http_status_code(),
            409
        );
        assert_eq!(LedgerError::ConcurrentModification.http_status_code(), 409);
        assert_eq!(LedgerError::Database("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_retryable() {
        assert!(LedgerError::ConcurrentModification.is_retryable());
        assert!(!LedgerError::AlreadyPosted.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = LedgerError::UnbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 50.00"
        );
    }
}
