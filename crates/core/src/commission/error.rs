//! Error types for commission computation and settlement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the commission engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommissionError {
    /// The provider's commission rate is outside 0..=100.
    #[error("Commission rate {0} is not a valid percentage")]
    InvalidRate(Decimal),

    /// The provider is deactivated.
    #[error("Referral provider is inactive")]
    ProviderInactive,

    /// The period has no qualifying activity.
    #[error("No qualifying invoices between {start} and {end}")]
    NoActivity {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// The period bounds are inverted.
    #[error("Period start {start} is after period end {end}")]
    InvalidPeriod {
        /// Period start.
        start: NaiveDate,
        /// Period end.
        end: NaiveDate,
    },

    /// A qualifying invoice falls outside the requested period.
    #[error("Invoice dated {0} is outside the requested period")]
    InvoiceOutOfPeriod(NaiveDate),

    /// A settlement already exists for the invoice.
    #[error("Invoice has already been settled")]
    AlreadySettled,

    /// The settlement amount exceeds the invoice total.
    #[error("Settlement amount {amount} exceeds invoice total {invoice_total}")]
    AmountExceedsInvoice {
        /// The attempted payout.
        amount: Decimal,
        /// The invoice total.
        invoice_total: Decimal,
    },

    /// The settlement amount must be positive.
    #[error("Settlement amount must be greater than zero")]
    AmountNotPositive,

    /// The provider was not found.
    #[error("Referral provider not found")]
    ProviderNotFound,

    /// The referral invoice was not found.
    #[error("Referral invoice not found")]
    InvoiceNotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CommissionError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::ProviderInactive => "PROVIDER_INACTIVE",
            Self::NoActivity { .. } => "NO_ACTIVITY",
            Self::InvalidPeriod { .. } => "INVALID_PERIOD",
            Self::InvoiceOutOfPeriod(_) => "INVOICE_OUT_OF_PERIOD",
            Self::AlreadySettled => "ALREADY_SETTLED",
            Self::AmountExceedsInvoice { .. } => "AMOUNT_EXCEEDS_INVOICE",
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::ProviderNotFound => "PROVIDER_NOT_FOUND",
            Self::InvoiceNotFound => "INVOICE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code a transport layer should map this to.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidRate(_)
            | Self::InvalidPeriod { .. }
            | Self::InvoiceOutOfPeriod(_)
            | Self::AmountExceedsInvoice { .. }
            | Self::AmountNotPositive => 400,
            Self::ProviderNotFound | Self::InvoiceNotFound => 404,
            Self::ProviderInactive | Self::NoActivity { .. } | Self::AlreadySettled => 409,
            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CommissionError::InvalidRate(dec!(150)).error_code(),
            "INVALID_RATE"
        );
        assert_eq!(CommissionError::AlreadySettled.error_code(), "ALREADY_SETTLED");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(CommissionError::AmountNotPositive.http_status_code(), 400);
        assert_eq!(CommissionError::ProviderNotFound.http_status_code(), 404);
        assert_eq!(CommissionError::AlreadySettled.http_status_code(), 409);
    }
}
