//! Ledger domain types for journal entry creation and validation.
//!
//! This module defines the core types used for creating and validating
//! journal entries in the double-entry bookkeeping system.

use chrono::NaiveDate;
use diagna_shared::types::{BranchId, TenantId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Account type classification.
///
/// Determines the balance rule for an account:
/// - Asset/Expense accounts are debit-normal
/// - Liability/Equity/Revenue accounts are credit-normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (cash, receivables, equipment).
    Asset,
    /// Liability account (payables, accrued commissions).
    Liability,
    /// Equity account.
    Equity,
    /// Revenue account (diagnostic services).
    Revenue,
    /// Expense account (reagents, salaries, commissions).
    Expense,
}

impl AccountType {
    /// Returns the string representation of the account type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Parses an account type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns true if the account increases with debits.
    #[must_use]
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Journal entry status.
///
/// Entries progress `Draft → Pending → Posted`; `Voided` is terminal.
/// Posted entries are never undone in place - corrections are reversing
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry is awaiting posting.
    Pending,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been voided via a reversing entry (immutable).
    Voided,
}

impl JournalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Posted => "posted",
            Self::Voided => "voided",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "posted" => Some(Self::Posted),
            "voided" => Some(Self::Voided),
            _ => None,
        }
    }

    /// Returns true if the entry can still be posted.
    #[must_use]
    pub fn is_postable(&self) -> bool {
        matches!(self, Self::Draft | Self::Pending)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Voided)
    }
}

impl fmt::Display for JournalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The source document a journal entry was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceType {
    /// Patient billing invoice.
    BillingInvoice,
    /// Petty cash disbursement.
    PettyCash,
    /// General expense request.
    Expense,
    /// Vendor payment from a three-way match.
    VendorPayment,
    /// Referral commission settlement.
    CommissionSettlement,
    /// Bank deposit.
    BankDeposit,
    /// Reversal of a previous entry.
    Reversal,
    /// Manual adjustment.
    Manual,
}

impl ReferenceType {
    /// Returns the string representation of the reference type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BillingInvoice => "billing_invoice",
            Self::PettyCash => "petty_cash",
            Self::Expense => "expense",
            Self::VendorPayment => "vendor_payment",
            Self::CommissionSettlement => "commission_settlement",
            Self::BankDeposit => "bank_deposit",
            Self::Reversal => "reversal",
            Self::Manual => "manual",
        }
    }
}

/// Reference to the external document that produced a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The kind of source document.
    pub reference_type: ReferenceType,
    /// The external document id or number.
    pub reference_id: String,
}

/// Input for a single line item in a journal entry.
///
/// Exactly one of `debit` or `credit` must be nonzero.
#[derive(Debug, Clone)]
pub struct LineItemInput {
    /// The account to post to.
    pub account_id: Uuid,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional memo for this line.
    pub memo: Option<String>,
}

impl LineItemInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            memo: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            memo: None,
        }
    }
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct CreateJournalEntryInput {
    /// The tenant this entry belongs to.
    pub tenant_id: TenantId,
    /// Optional branch scope.
    pub branch_id: Option<BranchId>,
    /// The date of the entry.
    pub entry_date: NaiveDate,
    /// A description of the entry.
    pub description: String,
    /// Optional source-document reference.
    pub reference: Option<Reference>,
    /// The line items (must have at least 2).
    pub line_items: Vec<LineItemInput>,
    /// The user creating the entry.
    pub created_by: UserId,
}

/// A validated line item with the account's balance rule resolved.
#[derive(Debug, Clone)]
pub struct ResolvedLineItem {
    /// The account to post to.
    pub account_id: Uuid,
    /// The account type (drives the balance rule on posting).
    pub account_type: AccountType,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

/// Journal entry totals for validation and display.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates new totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_type_roundtrip() {
        for ty in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            assert_eq!(AccountType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(AccountType::parse("unknown"), None);
    }

    #[test]
    fn test_account_type_debit_normal() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_journal_status_postable() {
        assert!(JournalStatus::Draft.is_postable());
        assert!(JournalStatus::Pending.is_postable());
        assert!(!JournalStatus::Posted.is_postable());
        assert!(!JournalStatus::Voided.is_postable());
    }

    #[test]
    fn test_journal_status_immutable() {
        assert!(!JournalStatus::Draft.is_immutable());
        assert!(!JournalStatus::Pending.is_immutable());
        assert!(JournalStatus::Posted.is_immutable());
        assert!(JournalStatus::Voided.is_immutable());
    }

    #[test]
    fn test_journal_status_parse() {
        assert_eq!(JournalStatus::parse("POSTED"), Some(JournalStatus::Posted));
        assert_eq!(JournalStatus::parse("draft"), Some(JournalStatus::Draft));
        assert_eq!(JournalStatus::parse("bogus"), None);
    }

    #[test]
    fn test_line_item_constructors() {
        let account_id = Uuid::new_v4();
        let line = LineItemInput::debit(account_id, dec!(100));
        assert_eq!(line.debit, dec!(100));
        assert_eq!(line.credit, Decimal::ZERO);

        let line = LineItemInput::credit(account_id, dec!(100));
        assert_eq!(line.debit, Decimal::ZERO);
        assert_eq!(line.credit, dec!(100));
    }

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }
}
