//! Double-entry bookkeeping logic.
//!
//! # Modules
//!
//! - `types` - Journal entry and account domain types
//! - `error` - Ledger error types
//! - `service` - Journal entry validation
//! - `balance` - Account balance rules
//! - `reversal` - Reversing-entry creation for voids
//! - `chart` - Standard chart of accounts seed

pub mod balance;
pub mod chart;
pub mod error;
pub mod reversal;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::{AccountBalance, balance_change};
pub use chart::{StandardAccount, standard_chart};
pub use error::LedgerError;
pub use reversal::{ReversalInput, ReversalOutput, ReversalService};
pub use service::{AccountInfo, LedgerService};
pub use types::{
    AccountType, CreateJournalEntryInput, EntryTotals, JournalStatus, LineItemInput, Reference,
    ReferenceType, ResolvedLineItem,
};
