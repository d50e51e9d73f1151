//! Referral commission domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use diagna_shared::types::ReferralProviderId;

/// Commission terms for a referral provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTerms {
    /// The provider.
    pub provider_id: ReferralProviderId,
    /// Commission percentage applied to each service price.
    pub commission_rate: Decimal,
    /// Whether the provider is currently active.
    pub is_active: bool,
}

/// One billed service on a patient invoice, as passed in by billing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilledService {
    /// The diagnostic test.
    pub test_id: Uuid,
    /// The billed price.
    pub price: Decimal,
    /// The per-service rebate cap for this test.
    pub max_rebate_amount: Decimal,
}

/// Computed commission for one billed service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCommission {
    /// The diagnostic test.
    pub test_id: Uuid,
    /// The billed price.
    pub price: Decimal,
    /// The rebate owed, after applying the per-test cap.
    pub rebate: Decimal,
}

/// Full commission computation for one visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionBreakdown {
    /// Per-service rebates.
    pub services: Vec<ServiceCommission>,
    /// Total commission, rounded to the nearest whole currency unit.
    pub total: Decimal,
}

impl CommissionBreakdown {
    /// A zero breakdown, used for self-pay visits.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            services: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}

/// One paid patient invoice that qualifies for a period invoice.
#[derive(Debug, Clone)]
pub struct QualifyingInvoice {
    /// The billing invoice.
    pub invoice_id: Uuid,
    /// The service date.
    pub invoice_date: NaiveDate,
    /// The billed services on the invoice.
    pub services: Vec<BilledService>,
}

/// One line of a referral invoice, one per billed service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralInvoiceLine {
    /// The source billing invoice.
    pub invoice_id: Uuid,
    /// The diagnostic test.
    pub test_id: Uuid,
    /// The service date.
    pub service_date: NaiveDate,
    /// The billed price.
    pub price: Decimal,
    /// The commission owed for this line.
    pub commission: Decimal,
}

/// Aggregated content of a referral invoice over a period.
#[derive(Debug, Clone)]
pub struct PeriodAggregate {
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// One line per billed service in the period.
    pub line_items: Vec<ReferralInvoiceLine>,
    /// Total commission, rounded to the nearest whole currency unit.
    pub total_commission: Decimal,
}

/// Lifecycle of a referral invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralInvoiceStatus {
    /// Issued, awaiting settlement.
    Pending,
    /// Settled in full.
    Paid,
}

impl ReferralInvoiceStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for ReferralInvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a settlement was paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payout.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Cheque.
    Cheque,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
        }
    }

    /// Parses a method from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "bank_transfer" => Some(Self::BankTransfer),
            "cheque" => Some(Self::Cheque),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of a referral invoice at settlement time.
#[derive(Debug, Clone)]
pub struct SettlementInput {
    /// The invoice's total commission.
    pub invoice_total: Decimal,
    /// Whether a settlement already exists for the invoice.
    pub already_settled: bool,
    /// The amount being paid out.
    pub amount: Decimal,
    /// How it is being paid.
    pub method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_round_trip() {
        for s in [ReferralInvoiceStatus::Pending, ReferralInvoiceStatus::Paid] {
            assert_eq!(ReferralInvoiceStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(ReferralInvoiceStatus::parse("void"), None);
    }

    #[test]
    fn test_payment_method_round_trip() {
        for m in [
            PaymentMethod::Cash,
            PaymentMethod::BankTransfer,
            PaymentMethod::Cheque,
        ] {
            assert_eq!(PaymentMethod::parse(m.as_str()), Some(m));
        }
    }

    #[test]
    fn test_zero_breakdown() {
        let breakdown = CommissionBreakdown::zero();
        assert!(breakdown.services.is_empty());
        assert_eq!(breakdown.total, Decimal::ZERO);
    }
}
