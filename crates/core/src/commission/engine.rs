//! Commission computation, period invoicing, and settlement rules.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::ledger::types::LineItemInput;

use super::error::CommissionError;
use super::types::{
    BilledService, CommissionBreakdown, PeriodAggregate, ProviderTerms, QualifyingInvoice,
    ReferralInvoiceLine, ServiceCommission, SettlementInput,
};

/// Stateless engine for referral commission arithmetic.
pub struct CommissionEngine;

impl CommissionEngine {
    /// Compute the commission for one visit.
    ///
    /// Per service, the rebate is the provider's percentage of the
    /// price, capped at the service's `max_rebate_amount`. The total is
    /// rounded to the nearest whole currency unit with banker's
    /// rounding. A visit with no referral provider always yields zero,
    /// regardless of the patient's referral history.
    ///
    /// # Errors
    /// * `InvalidRate` if the rate is outside 0..=100
    /// * `ProviderInactive` if the provider is deactivated
    pub fn compute_commission(
        services: &[BilledService],
        provider: Option<&ProviderTerms>,
    ) -> Result<CommissionBreakdown, CommissionError> {
        let Some(terms) = provider else {
            return Ok(CommissionBreakdown::zero());
        };
        if terms.commission_rate < Decimal::ZERO || terms.commission_rate > Decimal::ONE_HUNDRED {
            return Err(CommissionError::InvalidRate(terms.commission_rate));
        }
        if !terms.is_active {
            return Err(CommissionError::ProviderInactive);
        }

        let per_service: Vec<ServiceCommission> = services
            .iter()
            .map(|s| ServiceCommission {
                test_id: s.test_id,
                price: s.price,
                rebate: Self::service_rebate(s, terms.commission_rate),
            })
            .collect();

        let raw_total: Decimal = per_service.iter().map(|s| s.rebate).sum();
        Ok(CommissionBreakdown {
            services: per_service,
            total: raw_total.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven),
        })
    }

    /// The capped rebate for one service.
    fn service_rebate(service: &BilledService, rate: Decimal) -> Decimal {
        let proportional = service.price * rate / Decimal::ONE_HUNDRED;
        proportional.min(service.max_rebate_amount).max(Decimal::ZERO)
    }

    /// Aggregate a provider's qualifying invoices into a period
    /// invoice.
    ///
    /// Produces one line per billed service; lines carry the exact
    /// capped rebate, and only the invoice total is rounded.
    ///
    /// # Errors
    /// * `InvalidPeriod` if start is after end
    /// * `NoActivity` if there are no qualifying invoices
    /// * `InvoiceOutOfPeriod` if the caller loaded an invoice outside
    ///   the requested range
    /// * Rate errors from [`Self::compute_commission`]
    pub fn generate_period_invoice(
        terms: &ProviderTerms,
        period_start: NaiveDate,
        period_end: NaiveDate,
        invoices: &[QualifyingInvoice],
    ) -> Result<PeriodAggregate, CommissionError> {
        if period_start > period_end {
            return Err(CommissionError::InvalidPeriod {
                start: period_start,
                end: period_end,
            });
        }
        if invoices.is_empty() {
            return Err(CommissionError::NoActivity {
                start: period_start,
                end: period_end,
            });
        }

        let mut line_items = Vec::new();
        for invoice in invoices {
            if invoice.invoice_date < period_start || invoice.invoice_date > period_end {
                return Err(CommissionError::InvoiceOutOfPeriod(invoice.invoice_date));
            }
            let breakdown = Self::compute_commission(&invoice.services, Some(terms))?;
            for service in breakdown.services {
                line_items.push(ReferralInvoiceLine {
                    invoice_id: invoice.invoice_id,
                    test_id: service.test_id,
                    service_date: invoice.invoice_date,
                    price: service.price,
                    commission: service.rebate,
                });
            }
        }

        let raw_total: Decimal = line_items.iter().map(|l| l.commission).sum();
        Ok(PeriodAggregate {
            period_start,
            period_end,
            line_items,
            total_commission: raw_total
                .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven),
        })
    }

    /// Format a referral invoice number, unique per tenant and period.
    #[must_use]
    pub fn period_invoice_number(period_start: NaiveDate, sequence: u32) -> String {
        format!("RI-{}-{sequence:04}", period_start.format("%Y%m"))
    }

    /// Validate a settlement against the invoice snapshot.
    ///
    /// # Errors
    /// * `AlreadySettled` if a prior settlement exists
    /// * `AmountNotPositive` if the payout is zero or negative
    /// * `AmountExceedsInvoice` if the payout exceeds the invoice total
    pub fn validate_settlement(input: &SettlementInput) -> Result<(), CommissionError> {
        if input.already_settled {
            return Err(CommissionError::AlreadySettled);
        }
        if input.amount <= Decimal::ZERO {
            return Err(CommissionError::AmountNotPositive);
        }
        if input.amount > input.invoice_total {
            return Err(CommissionError::AmountExceedsInvoice {
                amount: input.amount,
                invoice_total: input.invoice_total,
            });
        }
        Ok(())
    }

    /// Ledger line items for a settlement payout: debit commissions
    /// payable, credit the paying cash or bank account.
    #[must_use]
    pub fn settlement_journal_lines(
        amount: Decimal,
        payable_account_id: Uuid,
        paying_account_id: Uuid,
    ) -> Vec<LineItemInput> {
        vec![
            LineItemInput::debit(payable_account_id, amount),
            LineItemInput::credit(paying_account_id, amount),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commission::types::PaymentMethod;
    use diagna_shared::types::ReferralProviderId;
    use rust_decimal_macros::dec;

    fn terms(rate: Decimal) -> ProviderTerms {
        ProviderTerms {
            provider_id: ReferralProviderId::new(),
            commission_rate: rate,
            is_active: true,
        }
    }

    fn service(price: Decimal, cap: Decimal) -> BilledService {
        BilledService {
            test_id: Uuid::new_v4(),
            price,
            max_rebate_amount: cap,
        }
    }

    #[test]
    fn test_cap_limits_rebate() {
        // 10% of 5,000 is 500, capped at 400
        let breakdown = CommissionEngine::compute_commission(
            &[service(dec!(5000), dec!(400))],
            Some(&terms(dec!(10))),
        )
        .unwrap();
        assert_eq!(breakdown.services[0].rebate, dec!(400));
        assert_eq!(breakdown.total, dec!(400));
    }

    #[test]
    fn test_rebate_below_cap() {
        let breakdown = CommissionEngine::compute_commission(
            &[service(dec!(2000), dec!(400))],
            Some(&terms(dec!(10))),
        )
        .unwrap();
        assert_eq!(breakdown.total, dec!(200));
    }

    #[test]
    fn test_self_pay_yields_zero() {
        let breakdown =
            CommissionEngine::compute_commission(&[service(dec!(5000), dec!(400))], None).unwrap();
        assert_eq!(breakdown.total, Decimal::ZERO);
        assert!(breakdown.services.is_empty());
    }

    #[test]
    fn test_total_sums_multiple_services() {
        let breakdown = CommissionEngine::compute_commission(
            &[
                service(dec!(5000), dec!(400)),
                service(dec!(2000), dec!(400)),
                service(dec!(1000), dec!(50)),
            ],
            Some(&terms(dec!(10))),
        )
        .unwrap();
        // 400 + 200 + 50
        assert_eq!(breakdown.total, dec!(650));
    }

    #[test]
    fn test_total_uses_bankers_rounding() {
        // 7.5% of 10: rebate 0.75 per service, two services = 1.50,
        // banker's rounding to the even neighbour
        let breakdown = CommissionEngine::compute_commission(
            &[
                service(dec!(10), dec!(100)),
                service(dec!(10), dec!(100)),
            ],
            Some(&terms(dec!(7.5))),
        )
        .unwrap();
        assert_eq!(breakdown.total, dec!(2));

        let breakdown = CommissionEngine::compute_commission(
            &[service(dec!(10), dec!(100))],
            Some(&terms(dec!(5))),
        )
        .unwrap();
        // 0.50 rounds to 0 (even)
        assert_eq!(breakdown.total, dec!(0));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let result = CommissionEngine::compute_commission(
            &[service(dec!(100), dec!(10))],
            Some(&terms(dec!(150))),
        );
        assert_eq!(result.unwrap_err(), CommissionError::InvalidRate(dec!(150)));
    }

    #[test]
    fn test_inactive_provider_rejected() {
        let mut t = terms(dec!(10));
        t.is_active = false;
        let result =
            CommissionEngine::compute_commission(&[service(dec!(100), dec!(10))], Some(&t));
        assert_eq!(result.unwrap_err(), CommissionError::ProviderInactive);
    }

    fn period() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        )
    }

    fn qualifying(day: u32, services: Vec<BilledService>) -> QualifyingInvoice {
        QualifyingInvoice {
            invoice_id: Uuid::new_v4(),
            invoice_date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            services,
        }
    }

    #[test]
    fn test_period_invoice_aggregates_lines() {
        let (start, end) = period();
        let aggregate = CommissionEngine::generate_period_invoice(
            &terms(dec!(10)),
            start,
            end,
            &[
                qualifying(5, vec![service(dec!(5000), dec!(400))]),
                qualifying(12, vec![service(dec!(2000), dec!(400)), service(dec!(1000), dec!(50))]),
            ],
        )
        .unwrap();

        assert_eq!(aggregate.line_items.len(), 3);
        assert_eq!(aggregate.total_commission, dec!(650));
    }

    #[test]
    fn test_period_invoice_no_activity() {
        let (start, end) = period();
        let result = CommissionEngine::generate_period_invoice(&terms(dec!(10)), start, end, &[]);
        assert!(matches!(result, Err(CommissionError::NoActivity { .. })));
    }

    #[test]
    fn test_period_invoice_inverted_period() {
        let (start, end) = period();
        let result = CommissionEngine::generate_period_invoice(&terms(dec!(10)), end, start, &[]);
        assert!(matches!(result, Err(CommissionError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_period_invoice_out_of_range_invoice() {
        let (start, end) = period();
        let stray = QualifyingInvoice {
            invoice_id: Uuid::new_v4(),
            invoice_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            services: vec![service(dec!(100), dec!(10))],
        };
        let result =
            CommissionEngine::generate_period_invoice(&terms(dec!(10)), start, end, &[stray]);
        assert!(matches!(
            result,
            Err(CommissionError::InvoiceOutOfPeriod(_))
        ));
    }

    #[test]
    fn test_invoice_number_format() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(
            CommissionEngine::period_invoice_number(start, 7),
            "RI-202603-0007"
        );
    }

    fn settlement(invoice_total: Decimal, amount: Decimal) -> SettlementInput {
        SettlementInput {
            invoice_total,
            already_settled: false,
            amount,
            method: PaymentMethod::BankTransfer,
        }
    }

    #[test]
    fn test_settlement_full_amount_ok() {
        assert!(CommissionEngine::validate_settlement(&settlement(dec!(650), dec!(650))).is_ok());
    }

    #[test]
    fn test_settlement_partial_amount_ok() {
        assert!(CommissionEngine::validate_settlement(&settlement(dec!(650), dec!(300))).is_ok());
    }

    #[test]
    fn test_settlement_twice_rejected() {
        let mut input = settlement(dec!(650), dec!(650));
        input.already_settled = true;
        assert_eq!(
            CommissionEngine::validate_settlement(&input).unwrap_err(),
            CommissionError::AlreadySettled
        );
    }

    #[test]
    fn test_settlement_over_invoice_rejected() {
        let result = CommissionEngine::validate_settlement(&settlement(dec!(650), dec!(700)));
        assert!(matches!(
            result,
            Err(CommissionError::AmountExceedsInvoice { .. })
        ));
    }

    #[test]
    fn test_settlement_nonpositive_rejected() {
        let result = CommissionEngine::validate_settlement(&settlement(dec!(650), Decimal::ZERO));
        assert_eq!(result.unwrap_err(), CommissionError::AmountNotPositive);
    }

    #[test]
    fn test_settlement_journal_lines_balance() {
        let payable = Uuid::new_v4();
        let cash = Uuid::new_v4();
        let lines = CommissionEngine::settlement_journal_lines(dec!(650), payable, cash);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].account_id, payable);
        assert_eq!(lines[0].debit, dec!(650));
        assert_eq!(lines[1].account_id, cash);
        assert_eq!(lines[1].credit, dec!(650));
    }
}
