//! Standard chart of accounts for a diagnostic center.
//!
//! Seeded once per tenant by `initialize_chart_of_accounts`. Codes are
//! immutable once an account has postings.

use super::types::AccountType;

/// Cash on hand (cashier drawers).
pub const ACCT_CASH_ON_HAND: &str = "1000";
/// Bank / deposit account.
pub const ACCT_BANK: &str = "1010";
/// Petty cash float.
pub const ACCT_PETTY_CASH: &str = "1020";
/// Accounts receivable.
pub const ACCT_ACCOUNTS_RECEIVABLE: &str = "1100";
/// Accounts payable.
pub const ACCT_ACCOUNTS_PAYABLE: &str = "2000";
/// Referral commissions payable.
pub const ACCT_COMMISSIONS_PAYABLE: &str = "2100";
/// Diagnostic services revenue.
pub const ACCT_SERVICES_REVENUE: &str = "4000";
/// Referral commission expense.
pub const ACCT_COMMISSION_EXPENSE: &str = "5200";
/// General operating expense.
pub const ACCT_GENERAL_EXPENSE: &str = "5300";

/// Template for one account in the standard chart.
#[derive(Debug, Clone)]
pub struct StandardAccount {
    /// Account code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype.
    pub subtype: &'static str,
}

/// Returns the standard diagnostic-center account set.
#[must_use]
pub fn standard_chart() -> Vec<StandardAccount> {
    vec![
        StandardAccount {
            code: ACCT_CASH_ON_HAND,
            name: "Cash on Hand",
            account_type: AccountType::Asset,
            subtype: "cash",
        },
        StandardAccount {
            code: ACCT_BANK,
            name: "Bank Account",
            account_type: AccountType::Asset,
            subtype: "bank",
        },
        StandardAccount {
            code: ACCT_PETTY_CASH,
            name: "Petty Cash",
            account_type: AccountType::Asset,
            subtype: "cash",
        },
        StandardAccount {
            code: ACCT_ACCOUNTS_RECEIVABLE,
            name: "Accounts Receivable",
            account_type: AccountType::Asset,
            subtype: "receivable",
        },
        StandardAccount {
            code: "1200",
            name: "Inventory - Reagents and Consumables",
            account_type: AccountType::Asset,
            subtype: "inventory",
        },
        StandardAccount {
            code: "1500",
            name: "Laboratory Equipment",
            account_type: AccountType::Asset,
            subtype: "fixed_asset",
        },
        StandardAccount {
            code: ACCT_ACCOUNTS_PAYABLE,
            name: "Accounts Payable",
            account_type: AccountType::Liability,
            subtype: "payable",
        },
        StandardAccount {
            code: ACCT_COMMISSIONS_PAYABLE,
            name: "Referral Commissions Payable",
            account_type: AccountType::Liability,
            subtype: "payable",
        },
        StandardAccount {
            code: "2200",
            name: "Taxes Payable",
            account_type: AccountType::Liability,
            subtype: "tax",
        },
        StandardAccount {
            code: "3000",
            name: "Owner's Equity",
            account_type: AccountType::Equity,
            subtype: "capital",
        },
        StandardAccount {
            code: ACCT_SERVICES_REVENUE,
            name: "Diagnostic Services Revenue",
            account_type: AccountType::Revenue,
            subtype: "operating",
        },
        StandardAccount {
            code: "4100",
            name: "Other Income",
            account_type: AccountType::Revenue,
            subtype: "other",
        },
        StandardAccount {
            code: "5000",
            name: "Reagents and Consumables Expense",
            account_type: AccountType::Expense,
            subtype: "cost_of_services",
        },
        StandardAccount {
            code: "5100",
            name: "Salaries Expense",
            account_type: AccountType::Expense,
            subtype: "payroll",
        },
        StandardAccount {
            code: ACCT_COMMISSION_EXPENSE,
            name: "Referral Commission Expense",
            account_type: AccountType::Expense,
            subtype: "commission",
        },
        StandardAccount {
            code: ACCT_GENERAL_EXPENSE,
            name: "General Operating Expense",
            account_type: AccountType::Expense,
            subtype: "operating",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique() {
        let chart = standard_chart();
        let codes: HashSet<_> = chart.iter().map(|a| a.code).collect();
        assert_eq!(codes.len(), chart.len());
    }

    #[test]
    fn test_posting_targets_exist() {
        let chart = standard_chart();
        for code in [
            ACCT_CASH_ON_HAND,
            ACCT_BANK,
            ACCT_PETTY_CASH,
            ACCT_COMMISSIONS_PAYABLE,
            ACCT_COMMISSION_EXPENSE,
            ACCT_GENERAL_EXPENSE,
        ] {
            assert!(chart.iter().any(|a| a.code == code), "missing {code}");
        }
    }

    #[test]
    fn test_every_type_represented() {
        let chart = standard_chart();
        for ty in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            assert!(chart.iter().any(|a| a.account_type == ty));
        }
    }
}
