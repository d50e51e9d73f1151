//! Property-based tests for cash reconciliation.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::reconciliation::engine::ReconciliationEngine;
use crate::reconciliation::types::{DepositStatus, VerifiedCashTransaction};

fn arb_transactions() -> impl Strategy<Value = Vec<VerifiedCashTransaction>> {
    prop::collection::vec((1i64..1_000_000, 0i64..86_400 * 30), 0..20).prop_map(|raw| {
        raw.into_iter()
            .map(|(amount, offset)| VerifiedCashTransaction {
                id: Uuid::new_v4(),
                amount: Decimal::from(amount),
                collected_at: Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::seconds(offset),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With no verified deposit, every transaction contributes.
    #[test]
    fn prop_no_cutoff_counts_everything(transactions in arb_transactions()) {
        let result = ReconciliationEngine::undeposited_cash(&transactions, None);
        let expected: Decimal = transactions.iter().map(|t| t.amount).sum();
        prop_assert_eq!(result.amount, expected);
        prop_assert_eq!(result.transaction_count, transactions.len());
    }

    /// A later cutoff never increases undeposited cash.
    #[test]
    fn prop_cutoff_is_monotone(
        transactions in arb_transactions(),
        early_offset in 0i64..86_400 * 15,
        extra in 1i64..86_400 * 15,
    ) {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let early = base + chrono::Duration::seconds(early_offset);
        let late = early + chrono::Duration::seconds(extra);

        let at_early = ReconciliationEngine::undeposited_cash(&transactions, Some(early));
        let at_late = ReconciliationEngine::undeposited_cash(&transactions, Some(late));
        prop_assert!(at_late.amount <= at_early.amount);
        prop_assert!(at_late.transaction_count <= at_early.transaction_count);
    }

    /// Classification flags exactly the deposits whose difference
    /// exceeds the tolerance.
    #[test]
    fn prop_classification_matches_tolerance(
        amount in 1i64..10_000_000,
        linked in 0i64..10_000_000,
        tolerance in 0i64..1000,
    ) {
        let amount = Decimal::from(amount);
        let linked = Decimal::from(linked);
        let tolerance = Decimal::from(tolerance);

        let result = ReconciliationEngine::classify_deposit(amount, linked, tolerance).unwrap();
        let expected_flagged = (amount - linked).abs() > tolerance;
        prop_assert_eq!(result.status == DepositStatus::Flagged, expected_flagged);
        prop_assert_eq!(result.discrepancy_amount.is_some(), expected_flagged);
    }
}
