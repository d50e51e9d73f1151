//! Cash-versus-deposit reconciliation rules.
//!
//! Undeposited cash is cumulative: everything verified since the last
//! verified deposit counts, whether it was collected today or a week
//! ago. The variance report is an oversight tool and enforces nothing.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ReconciliationError;
use super::types::{
    DailyVariance, DepositClassification, DepositStatus, UndepositedCash, VarianceReport,
    VarianceSummary, VerifiedCashTransaction, VerifyDecision,
};

/// Stateless engine for cash reconciliation.
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Sum the verified cash collected strictly after the last
    /// verified deposit.
    ///
    /// With no verified deposit yet, every verified transaction
    /// counts.
    #[must_use]
    pub fn undeposited_cash(
        transactions: &[VerifiedCashTransaction],
        last_verified_deposit_at: Option<DateTime<Utc>>,
    ) -> UndepositedCash {
        let eligible: Vec<&VerifiedCashTransaction> = transactions
            .iter()
            .filter(|t| last_verified_deposit_at.is_none_or(|cutoff| t.collected_at > cutoff))
            .collect();

        if eligible.is_empty() {
            return UndepositedCash::empty();
        }

        UndepositedCash {
            amount: eligible.iter().map(|t| t.amount).sum(),
            transaction_count: eligible.len(),
            since: eligible.iter().map(|t| t.collected_at).min(),
        }
    }

    /// Classify a newly recorded deposit against its linked cash.
    ///
    /// A difference beyond the rounding tolerance forces the deposit
    /// into Flagged with a recorded discrepancy; otherwise it starts
    /// Pending.
    ///
    /// # Errors
    /// * `AmountNotPositive` if the deposit amount is zero or negative
    pub fn classify_deposit(
        amount: Decimal,
        linked_cash_amount: Decimal,
        rounding_tolerance: Decimal,
    ) -> Result<DepositClassification, ReconciliationError> {
        if amount <= Decimal::ZERO {
            return Err(ReconciliationError::AmountNotPositive);
        }

        let difference = amount - linked_cash_amount;
        if difference.abs() > rounding_tolerance {
            Ok(DepositClassification {
                status: DepositStatus::Flagged,
                discrepancy_amount: Some(difference),
                discrepancy_reason: Some(format!(
                    "Deposit amount differs from linked cash by {difference}"
                )),
            })
        } else {
            Ok(DepositClassification {
                status: DepositStatus::Pending,
                discrepancy_amount: None,
                discrepancy_reason: None,
            })
        }
    }

    /// Apply a reviewer's verdict to a deposit.
    ///
    /// # Errors
    /// * `AlreadyVerified` if the deposit is already verified
    /// * `RejectionReasonRequired` on a blank rejection reason
    pub fn verify_deposit(
        current_status: DepositStatus,
        decision: &VerifyDecision,
    ) -> Result<DepositStatus, ReconciliationError> {
        if !current_status.is_verifiable() {
            return Err(ReconciliationError::AlreadyVerified);
        }
        match decision {
            VerifyDecision::Accept => Ok(DepositStatus::Verified),
            VerifyDecision::Reject { reason } => {
                if reason.trim().is_empty() {
                    return Err(ReconciliationError::RejectionReasonRequired);
                }
                Ok(DepositStatus::Flagged)
            }
        }
    }

    /// Build the oversight report from daily collected and deposited
    /// totals.
    ///
    /// Month-to-date runs from the first of the `as_of` month;
    /// year-to-date from the first of January. The daily breakdown
    /// covers the month to date.
    #[must_use]
    pub fn variance_report(
        collections: &[(NaiveDate, Decimal)],
        deposits: &[(NaiveDate, Decimal)],
        as_of: NaiveDate,
    ) -> VarianceReport {
        let month_start = as_of.with_day(1).unwrap_or(as_of);
        let year_start = month_start.with_month(1).unwrap_or(month_start);

        let mut daily: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
        for (date, amount) in collections {
            if *date >= month_start && *date <= as_of {
                daily.entry(*date).or_default().0 += *amount;
            }
        }
        for (date, amount) in deposits {
            if *date >= month_start && *date <= as_of {
                daily.entry(*date).or_default().1 += *amount;
            }
        }

        VarianceReport {
            month_to_date: Self::summarize(collections, deposits, month_start, as_of),
            year_to_date: Self::summarize(collections, deposits, year_start, as_of),
            daily: daily
                .into_iter()
                .map(|(date, (collected, deposited))| DailyVariance {
                    date,
                    collected,
                    deposited,
                    variance: collected - deposited,
                })
                .collect(),
        }
    }

    fn summarize(
        collections: &[(NaiveDate, Decimal)],
        deposits: &[(NaiveDate, Decimal)],
        from: NaiveDate,
        to: NaiveDate,
    ) -> VarianceSummary {
        let in_window = |date: &NaiveDate| *date >= from && *date <= to;
        let collected: Decimal = collections
            .iter()
            .filter(|(d, _)| in_window(d))
            .map(|(_, a)| *a)
            .sum();
        let deposited: Decimal = deposits
            .iter()
            .filter(|(d, _)| in_window(d))
            .map(|(_, a)| *a)
            .sum();
        let variance = collected - deposited;
        let variance_percent = if collected == Decimal::ZERO {
            Decimal::ZERO
        } else {
            (variance / collected * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        };

        VarianceSummary {
            collected,
            deposited,
            variance,
            variance_percent,
        }
    }
}
