//! Property-based tests for three-way match classification.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::matching::engine::MatchingEngine;
use crate::matching::types::{MatchInput, MatchStatus, MatchTolerance, PurchaseOrderStatus};

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(Decimal::from)
}

fn arb_tolerance() -> impl Strategy<Value = MatchTolerance> {
    (1i64..20, 1i64..100_000).prop_map(|(pct, floor)| MatchTolerance {
        percent: Decimal::from(pct),
        floor: Decimal::from(floor),
    })
}

fn clean_input(po_amount: Decimal, invoice_amount: Decimal) -> MatchInput {
    let po_id = Uuid::new_v4();
    MatchInput {
        po_id,
        po_status: PurchaseOrderStatus::Approved,
        po_amount,
        po_already_matched: false,
        receipt_id: Uuid::new_v4(),
        receipt_po_id: po_id,
        receipt_already_matched: false,
        invoice_id: Uuid::new_v4(),
        invoice_amount,
        invoice_already_matched: false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Classification agrees with the tolerance arithmetic: within
    /// tolerance matches, beyond it is a discrepancy, never anything
    /// else at creation time.
    #[test]
    fn prop_classification_consistent(
        po_amount in arb_amount(),
        invoice_amount in arb_amount(),
        tolerance in arb_tolerance(),
    ) {
        let result =
            MatchingEngine::perform_match(&clean_input(po_amount, invoice_amount), &tolerance)
                .unwrap();

        prop_assert_eq!(result.variance, (po_amount - invoice_amount).abs());
        prop_assert_eq!(result.tolerance, tolerance.for_amount(po_amount));
        let expected = if result.variance <= result.tolerance {
            MatchStatus::Matched
        } else {
            MatchStatus::Discrepancy
        };
        prop_assert_eq!(result.status, expected);
    }

    /// The effective tolerance is never below the floor and never
    /// below the percentage of the PO amount.
    #[test]
    fn prop_tolerance_is_max_of_components(
        po_amount in arb_amount(),
        tolerance in arb_tolerance(),
    ) {
        let effective = tolerance.for_amount(po_amount);
        prop_assert!(effective >= tolerance.floor);
        prop_assert!(effective >= po_amount * tolerance.percent / Decimal::ONE_HUNDRED);
    }

    /// Identical PO and invoice amounts always match.
    #[test]
    fn prop_exact_agreement_always_matches(
        amount in arb_amount(),
        tolerance in arb_tolerance(),
    ) {
        let result = MatchingEngine::perform_match(&clean_input(amount, amount), &tolerance)
            .unwrap();
        prop_assert_eq!(result.status, MatchStatus::Matched);
        prop_assert_eq!(result.variance, Decimal::ZERO);
    }

    /// Payment is allowed exactly for matched or manually approved
    /// classifications.
    #[test]
    fn prop_payment_gate_matches_status(
        po_amount in arb_amount(),
        invoice_amount in arb_amount(),
        tolerance in arb_tolerance(),
    ) {
        let result =
            MatchingEngine::perform_match(&clean_input(po_amount, invoice_amount), &tolerance)
                .unwrap();
        prop_assert_eq!(
            MatchingEngine::validate_payment_allowed(result.status).is_ok(),
            result.status != MatchStatus::Discrepancy
        );
    }
}
