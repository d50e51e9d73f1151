//! Three-way match computation and discrepancy clearance.

use rust_decimal::Decimal;

use super::error::{MatchedDocument, MatchingError};
use super::types::{MatchComputation, MatchInput, MatchStatus, MatchTolerance};

/// Stateless engine for three-way matching.
pub struct MatchingEngine;

impl MatchingEngine {
    /// Validate the three documents and classify the match.
    ///
    /// Exclusivity (at most one match per document) is validated here
    /// from the loaded snapshot and enforced again by storage
    /// uniqueness constraints, so a racing second match fails on
    /// commit rather than silently double-binding.
    ///
    /// # Errors
    /// * `AlreadyMatched` if any document is bound to another match
    /// * `ReferenceMismatch` if the receipt references a different PO
    /// * `PurchaseOrderNotApproved` if the PO is not in a matchable state
    pub fn perform_match(
        input: &MatchInput,
        tolerance: &MatchTolerance,
    ) -> Result<MatchComputation, MatchingError> {
        if input.po_already_matched {
            return Err(MatchingError::AlreadyMatched {
                document: MatchedDocument::PurchaseOrder,
            });
        }
        if input.receipt_already_matched {
            return Err(MatchingError::AlreadyMatched {
                document: MatchedDocument::GoodsReceipt,
            });
        }
        if input.invoice_already_matched {
            return Err(MatchingError::AlreadyMatched {
                document: MatchedDocument::VendorInvoice,
            });
        }
        if input.receipt_po_id != input.po_id {
            return Err(MatchingError::ReferenceMismatch);
        }
        if !input.po_status.is_receivable() {
            return Err(MatchingError::PurchaseOrderNotApproved(input.po_status));
        }

        let variance = (input.po_amount - input.invoice_amount).abs();
        let effective = tolerance.for_amount(input.po_amount);
        let status = if variance <= effective {
            MatchStatus::Matched
        } else {
            MatchStatus::Discrepancy
        };

        Ok(MatchComputation {
            variance,
            tolerance: effective,
            status,
        })
    }

    /// Manually clear a discrepancy.
    ///
    /// # Errors
    /// * `NotADiscrepancy` unless the match is in Discrepancy status
    /// * `VarianceExceedsLimit` if the variance is above the approver's
    ///   discretionary limit
    pub fn approve_discrepancy(
        current_status: MatchStatus,
        variance: Decimal,
        approver_limit: Decimal,
    ) -> Result<MatchStatus, MatchingError> {
        if current_status != MatchStatus::Discrepancy {
            return Err(MatchingError::NotADiscrepancy(current_status));
        }
        if variance > approver_limit {
            return Err(MatchingError::VarianceExceedsLimit {
                variance,
                limit: approver_limit,
            });
        }
        Ok(MatchStatus::Approved)
    }

    /// Gate payment scheduling on the match classification.
    ///
    /// # Errors
    /// * `PaymentBlocked` if the discrepancy has not been cleared
    pub fn validate_payment_allowed(status: MatchStatus) -> Result<(), MatchingError> {
        if status.payment_allowed() {
            Ok(())
        } else {
            Err(MatchingError::PaymentBlocked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::types::PurchaseOrderStatus;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn tolerance() -> MatchTolerance {
        MatchTolerance {
            percent: dec!(5),
            floor: dec!(1000),
        }
    }

    fn input(po_amount: Decimal, invoice_amount: Decimal) -> MatchInput {
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

    #[test]
    fn test_variance_within_tolerance_matches() {
        // 3% variance against a 5% tolerance
        let result =
            MatchingEngine::perform_match(&input(dec!(1_000_000), dec!(1_030_000)), &tolerance())
                .unwrap();
        assert_eq!(result.status, MatchStatus::Matched);
        assert_eq!(result.variance, dec!(30_000));
        assert_eq!(result.tolerance, dec!(50_000));
    }

    #[test]
    fn test_variance_beyond_tolerance_is_discrepancy() {
        // 8% variance against a 5% tolerance
        let result =
            MatchingEngine::perform_match(&input(dec!(1_000_000), dec!(1_080_000)), &tolerance())
                .unwrap();
        assert_eq!(result.status, MatchStatus::Discrepancy);
        assert_eq!(result.variance, dec!(80_000));
    }

    #[test]
    fn test_variance_exactly_at_tolerance_matches() {
        let result =
            MatchingEngine::perform_match(&input(dec!(1_000_000), dec!(1_050_000)), &tolerance())
                .unwrap();
        assert_eq!(result.status, MatchStatus::Matched);
    }

    #[test]
    fn test_invoice_below_po_uses_absolute_variance() {
        let result =
            MatchingEngine::perform_match(&input(dec!(1_000_000), dec!(920_000)), &tolerance())
                .unwrap();
        assert_eq!(result.variance, dec!(80_000));
        assert_eq!(result.status, MatchStatus::Discrepancy);
    }

    #[test]
    fn test_floor_covers_small_orders() {
        // 5% of 10,000 is 500; the 1,000 floor absorbs an 800 variance
        let result = MatchingEngine::perform_match(&input(dec!(10_000), dec!(10_800)), &tolerance())
            .unwrap();
        assert_eq!(result.status, MatchStatus::Matched);
    }

    #[test]
    fn test_already_matched_po_rejected() {
        let mut i = input(dec!(100_000), dec!(100_000));
        i.po_already_matched = true;
        let result = MatchingEngine::perform_match(&i, &tolerance());
        assert_eq!(
            result.unwrap_err(),
            MatchingError::AlreadyMatched {
                document: MatchedDocument::PurchaseOrder
            }
        );
    }

    #[test]
    fn test_already_matched_receipt_rejected() {
        let mut i = input(dec!(100_000), dec!(100_000));
        i.receipt_already_matched = true;
        let result = MatchingEngine::perform_match(&i, &tolerance());
        assert_eq!(
            result.unwrap_err(),
            MatchingError::AlreadyMatched {
                document: MatchedDocument::GoodsReceipt
            }
        );
    }

    #[test]
    fn test_already_matched_invoice_rejected() {
        let mut i = input(dec!(100_000), dec!(100_000));
        i.invoice_already_matched = true;
        let result = MatchingEngine::perform_match(&i, &tolerance());
        assert_eq!(
            result.unwrap_err(),
            MatchingError::AlreadyMatched {
                document: MatchedDocument::VendorInvoice
            }
        );
    }

    #[test]
    fn test_receipt_for_other_po_rejected() {
        let mut i = input(dec!(100_000), dec!(100_000));
        i.receipt_po_id = Uuid::new_v4();
        let result = MatchingEngine::perform_match(&i, &tolerance());
        assert_eq!(result.unwrap_err(), MatchingError::ReferenceMismatch);
    }

    #[test]
    fn test_unapproved_po_rejected() {
        let mut i = input(dec!(100_000), dec!(100_000));
        i.po_status = PurchaseOrderStatus::Draft;
        let result = MatchingEngine::perform_match(&i, &tolerance());
        assert_eq!(
            result.unwrap_err(),
            MatchingError::PurchaseOrderNotApproved(PurchaseOrderStatus::Draft)
        );
    }

    #[test]
    fn test_approve_discrepancy_within_limit() {
        let result =
            MatchingEngine::approve_discrepancy(MatchStatus::Discrepancy, dec!(80_000), dec!(100_000));
        assert_eq!(result.unwrap(), MatchStatus::Approved);
    }

    #[test]
    fn test_approve_discrepancy_beyond_limit() {
        let result =
            MatchingEngine::approve_discrepancy(MatchStatus::Discrepancy, dec!(80_000), dec!(50_000));
        assert!(matches!(
            result,
            Err(MatchingError::VarianceExceedsLimit { .. })
        ));
    }

    #[test]
    fn test_approve_non_discrepancy_fails() {
        let result =
            MatchingEngine::approve_discrepancy(MatchStatus::Matched, dec!(0), dec!(100_000));
        assert_eq!(
            result.unwrap_err(),
            MatchingError::NotADiscrepancy(MatchStatus::Matched)
        );

        let result =
            MatchingEngine::approve_discrepancy(MatchStatus::Approved, dec!(0), dec!(100_000));
        assert_eq!(
            result.unwrap_err(),
            MatchingError::NotADiscrepancy(MatchStatus::Approved)
        );
    }

    #[test]
    fn test_payment_gate() {
        assert!(MatchingEngine::validate_payment_allowed(MatchStatus::Matched).is_ok());
        assert!(MatchingEngine::validate_payment_allowed(MatchStatus::Approved).is_ok());
        assert_eq!(
            MatchingEngine::validate_payment_allowed(MatchStatus::Discrepancy).unwrap_err(),
            MatchingError::PaymentBlocked
        );
    }
}
