//! Account balance calculations.
//!
//! Balance rules:
//! - Asset/Expense: balance += debit - credit (debit-normal)
//! - Liability/Equity/Revenue: balance += credit - debit (credit-normal)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::AccountType;

/// Calculates the balance change for a line item based on account type.
#[must_use]
pub fn balance_change(account_type: AccountType, debit: Decimal, credit: Decimal) -> Decimal {
    if account_type.is_debit_normal() {
        debit - credit
    } else {
        credit - debit
    }
}

/// Accumulated balance for one account over a set of line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: Uuid,
    /// The account type.
    pub account_type: AccountType,
    /// Total debit amount applied.
    pub debit_total: Decimal,
    /// Total credit amount applied.
    pub credit_total: Decimal,
    /// Net balance per the account's balance rule.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Creates a zeroed balance for an account.
    #[must_use]
    pub fn new(account_id: Uuid, account_type: AccountType) -> Self {
        Self {
            account_id,
            account_type,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Applies a line item to the balance.
    pub fn apply(&mut self, debit: Decimal, credit: Decimal) {
        self.debit_total += debit;
        self.credit_total += credit;
        self.balance += balance_change(self.account_type, debit, credit);
    }
}
