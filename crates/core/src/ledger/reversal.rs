//! Reversing-entry creation for voiding posted journal entries.
//!
//! A posted entry is never mutated; voiding it produces a new balanced
//! entry with debits and credits swapped.

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{LineItemInput, Reference, ReferenceType, ResolvedLineItem};

/// Input for creating a reversing journal entry.
#[derive(Debug, Clone)]
pub struct ReversalInput {
    /// The ID of the original entry being voided.
    pub original_entry_id: Uuid,
    /// The original entry number (for the reversal description).
    pub original_entry_number: String,
    /// The original line items to reverse.
    pub original_lines: Vec<ResolvedLineItem>,
    /// The reason for voiding.
    pub void_reason: String,
}

/// Output from creating a reversing journal entry.
#[derive(Debug)]
pub struct ReversalOutput {
    /// The reversing line items (debits and credits swapped).
    pub reversing_lines: Vec<LineItemInput>,
    /// Description for the reversing entry.
    pub description: String,
    /// Reference pointing back at the original entry.
    pub reference: Reference,
}

/// Stateless service for creating reversing entries.
pub struct ReversalService;

impl ReversalService {
    /// Create reversing line items by swapping debits and credits.
    ///
    /// For each original line:
    /// - Debits become credits, credits become debits
    /// - The account is preserved
    /// - Memo is prefixed with "Reversal: ", falling back to the
    ///   original entry number when the line had no memo
    #[must_use]
    pub fn create_reversing_entry(input: &ReversalInput) -> ReversalOutput {
        let reversing_lines: Vec<LineItemInput> = input
            .original_lines
            .iter()
            .map(|line| LineItemInput {
                account_id: line.account_id,
                debit: line.credit,
                credit: line.debit,
                memo: Some(match &line.memo {
                    Some(memo) => format!("Reversal: {memo}"),
                    None => format!("Reversal of {}", input.original_entry_number),
                }),
            })
            .collect();

        ReversalOutput {
            reversing_lines,
            description: format!(
                "Reversal of {}. Reason: {}",
                input.original_entry_number, input.void_reason
            ),
            reference: Reference {
                reference_type: ReferenceType::Reversal,
                reference_id: input.original_entry_id.to_string(),
            },
        }
    }

    /// Validate that the original lines are balanced.
    ///
    /// This should always hold for posted entries; a false return indicates
    /// corrupted data rather than user error.
    #[must_use]
    pub fn validate_reversal(original_lines: &[ResolvedLineItem]) -> bool {
        let total_debit: Decimal = original_lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = original_lines.iter().map(|l| l.credit).sum();
        total_debit == total_credit
    }
}
