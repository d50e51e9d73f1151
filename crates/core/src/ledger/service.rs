//! Ledger service for journal entry validation.
//!
//! This module provides the core business logic for validating journal
//! entries before they are persisted. It contains pure functions with no
//! database dependencies; account lookups are injected as closures.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::LedgerError;
use super::types::{
    AccountType, CreateJournalEntryInput, EntryTotals, JournalStatus, LineItemInput,
    ResolvedLineItem,
};

/// Information about an account needed for validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: Uuid,
    /// Whether the account is active.
    pub is_active: bool,
    /// The account type.
    pub account_type: AccountType,
}

/// Ledger service for journal entry validation.
pub struct LedgerService;

impl LedgerService {
    /// Validate a journal entry before persisting.
    ///
    /// Performs all validation steps:
    /// 1. Validates the description is present
    /// 2. Validates minimum line items (at least 2)
    /// 3. Validates each line item's shape (exactly one of debit/credit,
    ///    positive amounts)
    /// 4. Validates accounts (exist, active) via the injected validator
    /// 5. Validates the balance invariant (`sum(debit) == sum(credit)`)
    ///
    /// # Arguments
    ///
    /// * `input` - The journal entry input to validate
    /// * `account_validator` - Function to validate and get account info
    ///
    /// # Returns
    ///
    /// A tuple of (resolved line items, entry totals) on success.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails.
    pub fn validate_entry<A>(
        input: &CreateJournalEntryInput,
        account_validator: A,
    ) -> Result<(Vec<ResolvedLineItem>, EntryTotals), LedgerError>
    where
        A: Fn(Uuid) -> Result<AccountInfo, LedgerError>,
    {
        if input.description.trim().is_empty() {
            return Err(LedgerError::DescriptionRequired);
        }

        if input.line_items.len() < 2 {
            return Err(LedgerError::InsufficientLineItems);
        }

        let mut resolved = Vec::with_capacity(input.line_items.len());
        for line in &input.line_items {
            resolved.push(Self::resolve_line(line, &account_validator)?);
        }

        let totals = Self::calculate_totals(&resolved);
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok((resolved, totals))
    }

    /// Validate a single line item and resolve its account.
    fn resolve_line<A>(
        line: &LineItemInput,
        account_validator: &A,
    ) -> Result<ResolvedLineItem, LedgerError>
    where
        A: Fn(Uuid) -> Result<AccountInfo, LedgerError>,
    {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }

        // Exactly one side must be set
        let has_debit = line.debit > Decimal::ZERO;
        let has_credit = line.credit > Decimal::ZERO;
        if has_debit && has_credit {
            return Err(LedgerError::LineItemBothSides(line.account_id));
        }
        if !has_debit && !has_credit {
            return Err(LedgerError::LineItemEmpty(line.account_id));
        }

        let account = account_validator(line.account_id)?;
        if !account.is_active {
            return Err(LedgerError::AccountInactive(line.account_id));
        }

        Ok(ResolvedLineItem {
            account_id: line.account_id,
            account_type: account.account_type,
            debit: line.debit,
            credit: line.credit,
            memo: line.memo.clone(),
        })
    }

    /// Calculate entry totals from resolved line items.
    #[must_use]
    pub fn calculate_totals(lines: &[ResolvedLineItem]) -> EntryTotals {
        let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
        EntryTotals::new(total_debit, total_credit)
    }

    /// Re-validate the balance invariant for already-persisted line items.
    ///
    /// Used at posting time to defend against concurrent line-item mutation
    /// between creation and posting.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnbalancedEntry` if the lines no longer balance.
    pub fn revalidate_balance(lines: &[ResolvedLineItem]) -> Result<EntryTotals, LedgerError> {
        let totals = Self::calculate_totals(lines);
        if !totals.is_balanced {
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }
        Ok(totals)
    }

    /// Validate that an entry can be posted.
    ///
    /// # Errors
    ///
    /// - `AlreadyPosted` if the entry is posted (callers treat this as an
    ///   idempotent success and return the current state)
    /// - `EntryVoided` if the entry is voided
    pub fn validate_can_post(status: JournalStatus) -> Result<(), LedgerError> {
        match status {
            JournalStatus::Draft | JournalStatus::Pending => Ok(()),
            JournalStatus::Posted => Err(LedgerError::AlreadyPosted),
            JournalStatus::Voided => Err(LedgerError::EntryVoided),
        }
    }

    /// Validate that an entry can be voided.
    ///
    /// Only posted entries can be voided; the correction is a reversing
    /// entry, never an in-place mutation.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::CanOnlyVoidPosted` if the entry is not posted.
    pub fn validate_can_void(status: JournalStatus) -> Result<(), LedgerError> {
        if status == JournalStatus::Posted {
            Ok(())
        } else {
            Err(LedgerError::CanOnlyVoidPosted(status))
        }
    }
}
