//! Repository abstractions for data access.
//!
//! Repositories load entity snapshots, run the stateless core engines
//! on them, and persist the resulting transitions atomically, hiding
//! the `SeaORM` implementation details from the rest of the
//! application.

pub mod account;
pub mod approval;
pub mod commission;
pub mod journal;
pub mod matching;
pub mod reconciliation;

pub use account::{AccountRepoError, AccountRepository};
pub use approval::{ApprovalRepoError, ApprovalRepository, DecisionRecord, PettyCashPosting};
pub use commission::{
    CommissionRepoError, CommissionRepository, InvoiceWithItems, SettlementAccounts,
};
pub use journal::{
    format_entry_number, EntryFilter, JournalEntryWithLines, JournalRepoError, JournalRepository,
    VoidOutcome,
};
pub use matching::{MatchingRepoError, MatchingRepository};
pub use reconciliation::{
    ReconciliationRepoError, ReconciliationRepository, RecordDepositInput,
};
