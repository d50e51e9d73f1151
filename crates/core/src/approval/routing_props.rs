//! Property-based tests for approval routing.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::approval::error::ApprovalError;
use crate::approval::routing::RoutingEngine;
use crate::approval::types::ThresholdRule;

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(Decimal::from)
}

/// Generate a threshold table with strictly increasing authority and
/// non-decreasing limits, the shape real configurations take.
fn arb_table() -> impl Strategy<Value = Vec<ThresholdRule>> {
    prop::collection::vec(1i64..10_000_000i64, 1..6).prop_map(|mut limits| {
        limits.sort_unstable();
        limits
            .into_iter()
            .enumerate()
            .map(|(i, limit)| ThresholdRule {
                role: format!("role_{i}"),
                authority: i16::try_from(i + 1).unwrap_or(i16::MAX),
                max_amount: Decimal::from(limit),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Routing always lands on the lowest authority whose threshold
    /// covers the amount, or fails when none does.
    #[test]
    fn prop_routing_is_deterministic_minimum(
        table in arb_table(),
        amount in arb_amount(),
    ) {
        match RoutingEngine::route(&table, amount) {
            Ok(rule) => {
                prop_assert!(rule.max_amount >= amount);
                // No lower authority could have covered it
                for other in &table {
                    if other.authority < rule.authority {
                        prop_assert!(other.max_amount < amount);
                    }
                }
            }
            Err(ApprovalError::NoApproverAvailable { .. }) => {
                for rule in &table {
                    prop_assert!(rule.max_amount < amount);
                }
            }
            Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
        }
    }

    /// Routing is order independent: shuffling the table never changes
    /// the selected authority.
    #[test]
    fn prop_routing_order_independent(
        table in arb_table(),
        amount in arb_amount(),
    ) {
        let mut reversed = table.clone();
        reversed.reverse();

        let a = RoutingEngine::route(&table, amount).map(|r| r.authority);
        let b = RoutingEngine::route(&reversed, amount).map(|r| r.authority);
        prop_assert_eq!(a, b);
    }

    /// Escalation always moves strictly upward and still covers the
    /// amount.
    #[test]
    fn prop_escalation_strictly_increases_authority(
        table in arb_table(),
        amount in arb_amount(),
        current in 0i16..8,
    ) {
        if let Ok(target) = RoutingEngine::escalate(&table, amount, current) {
            prop_assert!(target.authority > current);
            prop_assert!(target.max_amount >= amount);
        }
    }

    /// An authorized actor's threshold always covers the amount.
    #[test]
    fn prop_authorize_implies_coverage(
        threshold in arb_amount(),
        amount in arb_amount(),
    ) {
        let result = RoutingEngine::authorize(true, threshold, amount);
        prop_assert_eq!(result.is_ok(), threshold >= amount);
    }
}
