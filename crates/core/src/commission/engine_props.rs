//! Property-based tests for commission arithmetic.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use diagna_shared::types::ReferralProviderId;

use crate::commission::engine::CommissionEngine;
use crate::commission::types::{BilledService, ProviderTerms};

fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=100).prop_map(Decimal::from)
}

fn arb_service() -> impl Strategy<Value = BilledService> {
    (1i64..10_000_000, 0i64..1_000_000).prop_map(|(price, cap)| BilledService {
        test_id: Uuid::new_v4(),
        price: Decimal::from(price),
        max_rebate_amount: Decimal::from(cap),
    })
}

fn terms(rate: Decimal) -> ProviderTerms {
    ProviderTerms {
        provider_id: ReferralProviderId::new(),
        commission_rate: rate,
        is_active: true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every per-service rebate respects both the percentage and the
    /// cap, and is never negative.
    #[test]
    fn prop_rebate_capped_and_nonnegative(
        services in prop::collection::vec(arb_service(), 1..10),
        rate in arb_rate(),
    ) {
        let breakdown =
            CommissionEngine::compute_commission(&services, Some(&terms(rate))).unwrap();
        for (service, computed) in services.iter().zip(&breakdown.services) {
            prop_assert!(computed.rebate >= Decimal::ZERO);
            prop_assert!(computed.rebate <= service.max_rebate_amount);
            prop_assert!(computed.rebate <= service.price * rate / Decimal::ONE_HUNDRED);
        }
    }

    /// The rounded total never drifts more than half a unit from the
    /// raw sum of rebates.
    #[test]
    fn prop_total_close_to_raw_sum(
        services in prop::collection::vec(arb_service(), 1..10),
        rate in arb_rate(),
    ) {
        let breakdown =
            CommissionEngine::compute_commission(&services, Some(&terms(rate))).unwrap();
        let raw: Decimal = breakdown.services.iter().map(|s| s.rebate).sum();
        prop_assert!((breakdown.total - raw).abs() <= Decimal::new(5, 1));
        prop_assert_eq!(breakdown.total, breakdown.total.trunc());
    }

    /// A zero rate always yields a zero total, and no provider always
    /// yields a zero total.
    #[test]
    fn prop_zero_rate_and_self_pay_yield_zero(
        services in prop::collection::vec(arb_service(), 1..10),
    ) {
        let zero_rate =
            CommissionEngine::compute_commission(&services, Some(&terms(Decimal::ZERO))).unwrap();
        prop_assert_eq!(zero_rate.total, Decimal::ZERO);

        let self_pay = CommissionEngine::compute_commission(&services, None).unwrap();
        prop_assert_eq!(self_pay.total, Decimal::ZERO);
    }
}
