//! Error types for three-way matching.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{MatchStatus, PurchaseOrderStatus};

/// Which document blocked a match because it is already bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedDocument {
    /// The purchase order.
    PurchaseOrder,
    /// The goods receipt.
    GoodsReceipt,
    /// The vendor invoice.
    VendorInvoice,
}

impl MatchedDocument {
    /// Returns the string name of the document kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::GoodsReceipt => "goods_receipt",
            Self::VendorInvoice => "vendor_invoice",
        }
    }
}

/// Errors that can occur during three-way matching.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchingError {
    /// A document is already bound to another match.
    #[error("{} is already bound to another match", document.as_str())]
    AlreadyMatched {
        /// The offending document.
        document: MatchedDocument,
    },

    /// The goods receipt was recorded against a different PO.
    #[error("Goods receipt does not reference the given purchase order")]
    ReferenceMismatch,

    /// The PO is not in a matchable state.
    #[error("Purchase order in status {0} cannot be matched")]
    PurchaseOrderNotApproved(PurchaseOrderStatus),

    /// Only a discrepancy can be manually approved.
    #[error("Match in status {0} does not require approval")]
    NotADiscrepancy(MatchStatus),

    /// The variance exceeds the approver's discretionary limit.
    #[error("Variance {variance} exceeds approver limit {limit}")]
    VarianceExceedsLimit {
        /// The match variance.
        variance: Decimal,
        /// The approver's discretionary limit.
        limit: Decimal,
    },

    /// Payment was requested against an uncleared discrepancy.
    #[error("Payment is blocked until the discrepancy is approved")]
    PaymentBlocked,

    /// The match was not found.
    #[error("Three-way match not found")]
    MatchNotFound,

    /// A source document was not found.
    #[error("{} not found", document.as_str())]
    DocumentNotFound {
        /// The missing document.
        document: MatchedDocument,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl MatchingError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyMatched { .. } => "ALREADY_MATCHED",
            Self::ReferenceMismatch => "REFERENCE_MISMATCH",
            Self::PurchaseOrderNotApproved(_) => "PO_NOT_APPROVED",
            Self::NotADiscrepancy(_) => "NOT_A_DISCREPANCY",
            Self::VarianceExceedsLimit { .. } => "VARIANCE_EXCEEDS_LIMIT",
            Self::PaymentBlocked => "PAYMENT_BLOCKED",
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::DocumentNotFound { .. } => "DOCUMENT_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code a transport layer should map this to.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ReferenceMismatch => 400,
            Self::VarianceExceedsLimit { .. } => 403,
            Self::MatchNotFound | Self::DocumentNotFound { .. } => 404,
            Self::AlreadyMatched { .. }
            | Self::PurchaseOrderNotApproved(_)
            | Self::NotADiscrepancy(_)
            | Self::PaymentBlocked => 409,
            Self::Database(_) => 500,
        }
    }
}
