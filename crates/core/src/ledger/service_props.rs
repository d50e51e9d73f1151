//! Property-based tests for the ledger service.
//!
//! These validate the balance invariant and reversal properties over
//! generated journal entries.

use chrono::NaiveDate;
use diagna_shared::types::{TenantId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::error::LedgerError;
use crate::ledger::reversal::{ReversalInput, ReversalService};
use crate::ledger::service::{AccountInfo, LedgerService};
use crate::ledger::types::{
    AccountType, CreateJournalEntryInput, LineItemInput, ResolvedLineItem,
};

/// Strategy for generating positive decimal amounts (2 decimal places).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating account types.
fn arb_account_type() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
}

fn ok_account_validator(id: Uuid) -> Result<AccountInfo, LedgerError> {
    Ok(AccountInfo {
        id,
        is_active: true,
        account_type: AccountType::Asset,
    })
}

fn make_input(line_items: Vec<LineItemInput>) -> CreateJournalEntryInput {
    CreateJournalEntryInput {
        tenant_id: TenantId::new(),
        branch_id: None,
        entry_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        description: "Property test entry".to_string(),
        reference: None,
        line_items,
        created_by: UserId::new(),
    }
}

/// Build a balanced entry: N debit lines plus one credit line for the sum.
fn balanced_entry(amounts: Vec<Decimal>) -> CreateJournalEntryInput {
    let total: Decimal = amounts.iter().sum();
    let mut lines: Vec<LineItemInput> = amounts
        .into_iter()
        .map(|a| LineItemInput::debit(Uuid::new_v4(), a))
        .collect();
    lines.push(LineItemInput::credit(Uuid::new_v4(), total));
    make_input(lines)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any entry whose debits sum to its credits validates successfully.
    #[test]
    fn prop_balanced_entries_validate(
        amounts in prop::collection::vec(arb_amount(), 1..8)
    ) {
        let input = balanced_entry(amounts);
        let result = LedgerService::validate_entry(&input, ok_account_validator);
        prop_assert!(result.is_ok());
        let (_, totals) = result.unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.difference(), Decimal::ZERO);
    }

    /// Perturbing one side of a balanced entry always fails validation.
    #[test]
    fn prop_unbalanced_entries_fail(
        amounts in prop::collection::vec(arb_amount(), 1..8),
        perturbation in arb_amount(),
    ) {
        let mut input = balanced_entry(amounts);
        // Push the credit line off balance
        let last = input.line_items.len() - 1;
        input.line_items[last].credit += perturbation;

        let result = LedgerService::validate_entry(&input, ok_account_validator);
        prop_assert!(
            matches!(result, Err(LedgerError::UnbalancedEntry { .. })),
            "expected Err(UnbalancedEntry), got {result:?}"
        );
    }

    /// Validation never mutates balance state; the totals it reports equal
    /// the sums of the input lines.
    #[test]
    fn prop_totals_match_inputs(
        amounts in prop::collection::vec(arb_amount(), 1..8)
    ) {
        let input = balanced_entry(amounts.clone());
        let expected: Decimal = amounts.iter().sum();

        let (_, totals) = LedgerService::validate_entry(&input, ok_account_validator).unwrap();
        prop_assert_eq!(totals.total_debit, expected);
        prop_assert_eq!(totals.total_credit, expected);
    }

    /// A reversal of any balanced set of lines is itself balanced, and
    /// applying both nets to zero per account.
    #[test]
    fn prop_reversal_nets_to_zero(
        amounts in prop::collection::vec(arb_amount(), 1..8),
        account_type in arb_account_type(),
    ) {
        let total: Decimal = amounts.iter().sum();
        let mut lines: Vec<ResolvedLineItem> = amounts
            .iter()
            .map(|a| ResolvedLineItem {
                account_id: Uuid::new_v4(),
                account_type,
                debit: *a,
                credit: Decimal::ZERO,
                memo: None,
            })
            .collect();
        lines.push(ResolvedLineItem {
            account_id: Uuid::new_v4(),
            account_type,
            debit: Decimal::ZERO,
            credit: total,
            memo: None,
        });

        prop_assert!(ReversalService::validate_reversal(&lines));

        let output = ReversalService::create_reversing_entry(&ReversalInput {
            original_entry_id: Uuid::new_v4(),
            original_entry_number: "JE-000001".to_string(),
            original_lines: lines.clone(),
            void_reason: "prop".to_string(),
        });

        let rev_debit: Decimal = output.reversing_lines.iter().map(|l| l.debit).sum();
        let rev_credit: Decimal = output.reversing_lines.iter().map(|l| l.credit).sum();
        prop_assert_eq!(rev_debit, rev_credit);

        // Original + reversal cancel per line
        for (orig, rev) in lines.iter().zip(&output.reversing_lines) {
            prop_assert_eq!(orig.debit - rev.credit, Decimal::ZERO);
            prop_assert_eq!(orig.credit - rev.debit, Decimal::ZERO);
        }
    }
}
