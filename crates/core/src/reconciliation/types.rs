//! Cash reconciliation domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of a bank deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    /// Recorded, awaiting verification.
    Pending,
    /// Verified against the bank; immutable.
    Verified,
    /// Carries a discrepancy that needs review.
    Flagged,
}

impl DepositStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Flagged => "flagged",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "flagged" => Some(Self::Flagged),
            _ => None,
        }
    }

    /// Returns true if the deposit may still be verified.
    #[must_use]
    pub fn is_verifiable(&self) -> bool {
        matches!(self, Self::Pending | Self::Flagged)
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the cash reached the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositMethod {
    /// Deposited over the counter.
    Counter,
    /// Electronic transfer from a collection account.
    Transfer,
    /// Cheque deposit.
    Cheque,
}

impl DepositMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Transfer => "transfer",
            Self::Cheque => "cheque",
        }
    }

    /// Parses a method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "counter" => Some(Self::Counter),
            "transfer" => Some(Self::Transfer),
            "cheque" => Some(Self::Cheque),
            _ => None,
        }
    }
}

impl fmt::Display for DepositMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A verified cash collection, as loaded by the caller.
#[derive(Debug, Clone)]
pub struct VerifiedCashTransaction {
    /// The transaction.
    pub id: Uuid,
    /// The collected amount.
    pub amount: Decimal,
    /// When the cash was collected.
    pub collected_at: DateTime<Utc>,
}

/// Cumulative cash awaiting deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndepositedCash {
    /// Total verified cash collected since the last verified deposit.
    pub amount: Decimal,
    /// Number of contributing transactions.
    pub transaction_count: usize,
    /// Collection time of the oldest contributing transaction.
    pub since: Option<DateTime<Utc>>,
}

impl UndepositedCash {
    /// No cash awaiting deposit.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            amount: Decimal::ZERO,
            transaction_count: 0,
            since: None,
        }
    }
}

/// Classification of a newly recorded deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositClassification {
    /// The initial status.
    pub status: DepositStatus,
    /// Signed deposit-minus-linked-cash difference, when flagged.
    pub discrepancy_amount: Option<Decimal>,
    /// Human-readable discrepancy description, when flagged.
    pub discrepancy_reason: Option<String>,
}

/// The reviewer's verdict on a pending or flagged deposit.
#[derive(Debug, Clone)]
pub enum VerifyDecision {
    /// The deposit checks out against the bank.
    Accept,
    /// The deposit does not check out; keep it flagged.
    Reject {
        /// Why it was rejected.
        reason: String,
    },
}

/// Collected-versus-deposited totals for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyVariance {
    /// The day.
    pub date: NaiveDate,
    /// Verified cash collected that day.
    pub collected: Decimal,
    /// Verified deposits recorded that day.
    pub deposited: Decimal,
    /// Collected minus deposited.
    pub variance: Decimal,
}

/// Summary over one window (month to date, year to date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceSummary {
    /// Total verified cash collected.
    pub collected: Decimal,
    /// Total verified deposits.
    pub deposited: Decimal,
    /// Collected minus deposited.
    pub variance: Decimal,
    /// Variance as a percentage of collected, zero when nothing was
    /// collected.
    pub variance_percent: Decimal,
}

/// Oversight report for a tenant as of a reference date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceReport {
    /// Month-to-date summary.
    pub month_to_date: VarianceSummary,
    /// Year-to-date summary.
    pub year_to_date: VarianceSummary,
    /// Per-day breakdown for the month to date.
    pub daily: Vec<DailyVariance>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for s in [
            DepositStatus::Pending,
            DepositStatus::Verified,
            DepositStatus::Flagged,
        ] {
            assert_eq!(DepositStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn test_verifiable_statuses() {
        assert!(DepositStatus::Pending.is_verifiable());
        assert!(DepositStatus::Flagged.is_verifiable());
        assert!(!DepositStatus::Verified.is_verifiable());
    }

    #[test]
    fn test_method_round_trip() {
        for m in [
            DepositMethod::Counter,
            DepositMethod::Transfer,
            DepositMethod::Cheque,
        ] {
            assert_eq!(DepositMethod::parse(m.as_str()), Some(m));
        }
    }

    #[test]
    fn test_empty_undeposited() {
        let empty = UndepositedCash::empty();
        assert_eq!(empty.amount, Decimal::ZERO);
        assert_eq!(empty.transaction_count, 0);
        assert!(empty.since.is_none());
    }
}
