//! Three-way matching domain types.
//!
//! A three-way match binds one purchase order, one goods receipt, and
//! one vendor invoice, and classifies the PO-to-invoice variance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use diagna_shared::FinanceConfig;

/// Lifecycle of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// Being drafted.
    Draft,
    /// Submitted for monetary approval.
    PendingApproval,
    /// Approved; goods may be received against it.
    Approved,
    /// Fully received and matched.
    Executed,
    /// Rejected during approval.
    Rejected,
}

impl PurchaseOrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Executed => "executed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "executed" => Some(Self::Executed),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if goods may be received against this PO.
    #[must_use]
    pub fn is_receivable(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a vendor invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorInvoiceStatus {
    /// Received, not yet matched.
    Pending,
    /// Bound to a three-way match.
    Matched,
}

impl VendorInvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Matched => "matched",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "matched" => Some(Self::Matched),
            _ => None,
        }
    }
}

impl fmt::Display for VendorInvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome classification of a three-way match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Variance within tolerance; payment may proceed.
    Matched,
    /// Variance exceeds tolerance; requires manual clearance.
    Discrepancy,
    /// Discrepancy manually cleared by an authorized approver.
    Approved,
}

impl MatchStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Discrepancy => "discrepancy",
            Self::Approved => "approved",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "matched" => Some(Self::Matched),
            "discrepancy" => Some(Self::Discrepancy),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }

    /// Returns true if payment may be scheduled against this match.
    #[must_use]
    pub fn payment_allowed(&self) -> bool {
        matches!(self, Self::Matched | Self::Approved)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Variance tolerance for classifying a match.
///
/// The effective tolerance for a PO is the larger of a percentage of
/// the PO amount and a fixed floor, so small orders are not flagged
/// over trivial absolute differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTolerance {
    /// Percentage of the PO amount (e.g. 5 means 5%).
    pub percent: Decimal,
    /// Minimum absolute tolerance.
    pub floor: Decimal,
}

impl MatchTolerance {
    /// Builds the tolerance from tenant finance configuration.
    #[must_use]
    pub fn from_config(config: &FinanceConfig) -> Self {
        Self {
            percent: config.match_tolerance_percent,
            floor: config.match_tolerance_floor,
        }
    }

    /// Effective tolerance for a given PO amount.
    #[must_use]
    pub fn for_amount(&self, po_amount: Decimal) -> Decimal {
        let proportional = po_amount * self.percent / Decimal::ONE_HUNDRED;
        proportional.max(self.floor)
    }
}

/// Snapshot of the three documents being matched, as loaded by the
/// caller.
#[derive(Debug, Clone)]
pub struct MatchInput {
    /// The purchase order.
    pub po_id: Uuid,
    /// PO status at match time.
    pub po_status: PurchaseOrderStatus,
    /// PO total amount.
    pub po_amount: Decimal,
    /// Whether the PO is already bound to another match.
    pub po_already_matched: bool,
    /// The goods receipt.
    pub receipt_id: Uuid,
    /// The PO the receipt was recorded against.
    pub receipt_po_id: Uuid,
    /// Whether the receipt is already bound to another match.
    pub receipt_already_matched: bool,
    /// The vendor invoice.
    pub invoice_id: Uuid,
    /// Invoice total amount.
    pub invoice_amount: Decimal,
    /// Whether the invoice is already bound to another match.
    pub invoice_already_matched: bool,
}

/// Computed result of a three-way match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchComputation {
    /// Absolute PO-to-invoice variance.
    pub variance: Decimal,
    /// The effective tolerance that was applied.
    pub tolerance: Decimal,
    /// The resulting classification.
    pub status: MatchStatus,
}
