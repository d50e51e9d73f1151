//! Journal repository for journal entry database operations.
//!
//! All mutations run inside a single transaction with the tenant's RLS
//! context set. Posting and voiding use status-guarded updates so a
//! racing writer loses cleanly instead of double-applying balances.

use chrono::Utc;
use diagna_core::ledger::{
    balance_change, CreateJournalEntryInput, JournalStatus, LedgerError, LedgerService,
    ResolvedLineItem, ReversalInput, ReversalService,
};
use diagna_shared::types::{BranchId, TenantId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{journal_entries, journal_line_items, sea_orm_active_enums};
use crate::repositories::account::load_account_info_map;
use crate::rls::set_rls_context;

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalRepoError {
    /// Domain-level ledger error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Filter by status.
    pub status: Option<JournalStatus>,
    /// Filter by date range start.
    pub date_from: Option<chrono::NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<chrono::NaiveDate>,
}

/// A journal entry with its line items.
#[derive(Debug, Clone)]
pub struct JournalEntryWithLines {
    /// Entry header.
    pub entry: journal_entries::Model,
    /// Line items in insertion order.
    pub lines: Vec<journal_line_items::Model>,
}

/// Result of voiding a journal entry.
#[derive(Debug, Clone)]
pub struct VoidOutcome {
    /// The original entry, now voided.
    pub original: journal_entries::Model,
    /// The posted reversing entry.
    pub reversal: journal_entries::Model,
}

/// Journal repository for journal entry operations.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft journal entry after full validation.
    ///
    /// # Errors
    ///
    /// Returns validation errors from the ledger service or a database
    /// error.
    pub async fn create_entry(
        &self,
        input: CreateJournalEntryInput,
    ) -> Result<JournalEntryWithLines, JournalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, input.tenant_id.into_inner()).await?;

        let result = Self::insert_entry(&txn, &input, JournalStatus::Draft, None).await?;

        txn.commit().await?;
        info!(
            entry_id = %result.entry.id,
            entry_number = %result.entry.entry_number,
            "Journal entry created"
        );
        Ok(result)
    }

    /// Posts a journal entry, updating account balances atomically.
    ///
    /// Posting an already-posted entry is an idempotent no-op that
    /// returns the current state.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `EntryVoided`, `UnbalancedEntry` if the
    /// lines drifted since creation, `ConcurrentModification` if a
    /// racing writer won, or a database error.
    pub async fn post_entry(
        &self,
        tenant_id: TenantId,
        entry_id: Uuid,
        posted_by: UserId,
    ) -> Result<journal_entries::Model, JournalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        let status: JournalStatus = entry.status.clone().into();
        if status == JournalStatus::Posted {
            txn.commit().await?;
            return Ok(entry);
        }
        LedgerService::validate_can_post(status)?;

        let resolved = Self::load_resolved_lines(&txn, entry_id).await?;
        LedgerService::revalidate_balance(&resolved)?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let updated = journal_entries::Entity::update_many()
            .col_expr(
                journal_entries::Column::Status,
                sea_orm_active_enums::JournalStatus::Posted.as_enum(),
            )
            .col_expr(
                journal_entries::Column::PostedBy,
                Expr::value(Some(posted_by.into_inner())),
            )
            .col_expr(journal_entries::Column::PostedAt, Expr::value(Some(now)))
            .col_expr(journal_entries::Column::UpdatedAt, Expr::value(now))
            .filter(journal_entries::Column::Id.eq(entry_id))
            .filter(journal_entries::Column::Status.is_in([
                sea_orm_active_enums::JournalStatus::Draft,
                sea_orm_active_enums::JournalStatus::Pending,
            ]))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(LedgerError::ConcurrentModification.into());
        }

        Self::apply_balance_changes(&txn, &resolved).await?;

        let posted = journal_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        txn.commit().await?;
        info!(entry_id = %entry_id, entry_number = %posted.entry_number, "Journal entry posted");
        Ok(posted)
    }

    /// Voids a posted entry by posting a reversing entry.
    ///
    /// The original entry is never mutated beyond its status; the
    /// reversal and the void are committed in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `CanOnlyVoidPosted`, `VoidReasonRequired`,
    /// `ConcurrentModification` if a racing writer won, or a database
    /// error.
    pub async fn void_entry(
        &self,
        tenant_id: TenantId,
        entry_id: Uuid,
        voided_by: UserId,
        void_reason: &str,
    ) -> Result<VoidOutcome, JournalRepoError> {
        if void_reason.trim().is_empty() {
            return Err(LedgerError::VoidReasonRequired.into());
        }

        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        LedgerService::validate_can_void(entry.status.clone().into())?;

        let resolved = Self::load_resolved_lines(&txn, entry_id).await?;
        if !ReversalService::validate_reversal(&resolved) {
            let totals = LedgerService::calculate_totals(&resolved);
            return Err(LedgerError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            }
            .into());
        }

        let reversal = ReversalService::create_reversing_entry(&ReversalInput {
            original_entry_id: entry.id,
            original_entry_number: entry.entry_number.clone(),
            original_lines: resolved,
            void_reason: void_reason.to_string(),
        });
        let reversal_input = CreateJournalEntryInput {
            tenant_id,
            branch_id: entry.branch_id.map(BranchId::from_uuid),
            entry_date: Utc::now().date_naive(),
            description: reversal.description,
            reference: Some(reversal.reference),
            line_items: reversal.reversing_lines,
            created_by: voided_by,
        };
        let reversing_entry =
            Self::insert_entry(&txn, &reversal_input, JournalStatus::Posted, Some(entry.id))
                .await?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let updated = journal_entries::Entity::update_many()
            .col_expr(
                journal_entries::Column::Status,
                sea_orm_active_enums::JournalStatus::Voided.as_enum(),
            )
            .col_expr(
                journal_entries::Column::VoidedBy,
                Expr::value(Some(voided_by.into_inner())),
            )
            .col_expr(journal_entries::Column::VoidedAt, Expr::value(Some(now)))
            .col_expr(
                journal_entries::Column::VoidReason,
                Expr::value(Some(void_reason.to_string())),
            )
            .col_expr(journal_entries::Column::UpdatedAt, Expr::value(now))
            .filter(journal_entries::Column::Id.eq(entry_id))
            .filter(
                journal_entries::Column::Status
                    .eq(sea_orm_active_enums::JournalStatus::Posted),
            )
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(LedgerError::ConcurrentModification.into());
        }

        let original = journal_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;

        txn.commit().await?;
        info!(
            entry_id = %entry_id,
            reversal_id = %reversing_entry.entry.id,
            "Journal entry voided"
        );
        Ok(VoidOutcome {
            original,
            reversal: reversing_entry.entry,
        })
    }

    /// Gets a journal entry with its line items.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` or a database error.
    pub async fn get_entry(
        &self,
        tenant_id: TenantId,
        entry_id: Uuid,
    ) -> Result<JournalEntryWithLines, JournalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let entry = journal_entries::Entity::find_by_id(entry_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::EntryNotFound(entry_id))?;
        let lines = journal_line_items::Entity::find()
            .filter(journal_line_items::Column::JournalEntryId.eq(entry_id))
            .order_by_asc(journal_line_items::Column::LineOrder)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Lists journal entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_entries(
        &self,
        tenant_id: TenantId,
        filter: EntryFilter,
    ) -> Result<Vec<journal_entries::Model>, JournalRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let mut query = journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(tenant_id.into_inner()));
        if let Some(status) = filter.status {
            let db_status: sea_orm_active_enums::JournalStatus = status.into();
            query = query.filter(journal_entries::Column::Status.eq(db_status));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(to));
        }

        let entries = query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::CreatedAt)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(entries)
    }

    /// Validates, numbers, and inserts an already-posted journal entry
    /// inside the caller's transaction, applying balance changes.
    ///
    /// Used by workflows that post as a side effect of their own
    /// transition (petty cash approval, commission settlement).
    pub(crate) async fn insert_posted_entry(
        txn: &DatabaseTransaction,
        input: &CreateJournalEntryInput,
    ) -> Result<journal_entries::Model, JournalRepoError> {
        let result = Self::insert_entry(txn, input, JournalStatus::Posted, None).await?;
        Ok(result.entry)
    }

    /// Validates the input, allocates the next entry number, and
    /// inserts the header and lines in the given status.
    async fn insert_entry(
        txn: &DatabaseTransaction,
        input: &CreateJournalEntryInput,
        status: JournalStatus,
        reversal_of: Option<Uuid>,
    ) -> Result<JournalEntryWithLines, JournalRepoError> {
        let account_ids: Vec<Uuid> = input.line_items.iter().map(|l| l.account_id).collect();
        let account_map = load_account_info_map(txn, &account_ids).await?;
        let (resolved, _totals) = LedgerService::validate_entry(input, |id| {
            account_map
                .get(&id)
                .cloned()
                .ok_or(LedgerError::AccountNotFound(id))
        })?;

        let sequence = journal_entries::Entity::find()
            .filter(journal_entries::Column::TenantId.eq(input.tenant_id.into_inner()))
            .count(txn)
            .await?;
        let entry_number = format_entry_number(sequence + 1);

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let entry_id = Uuid::now_v7();
        let posted = status == JournalStatus::Posted;
        let entry = journal_entries::ActiveModel {
            id: Set(entry_id),
            tenant_id: Set(input.tenant_id.into_inner()),
            branch_id: Set(input.branch_id.map(BranchId::into_inner)),
            entry_number: Set(entry_number),
            entry_date: Set(input.entry_date),
            description: Set(input.description.clone()),
            reference_type: Set(input
                .reference
                .as_ref()
                .map(|r| r.reference_type.as_str().to_string())),
            reference_id: Set(input.reference.as_ref().map(|r| r.reference_id.clone())),
            status: Set(status.into()),
            created_by: Set(input.created_by.into_inner()),
            posted_by: Set(posted.then(|| input.created_by.into_inner())),
            posted_at: Set(posted.then_some(now)),
            voided_by: Set(None),
            voided_at: Set(None),
            void_reason: Set(None),
            reversal_of: Set(reversal_of),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let entry = entry.insert(txn).await?;

        let mut lines = Vec::with_capacity(resolved.len());
        for (order, line) in resolved.iter().enumerate() {
            let line_order = i32::try_from(order).unwrap_or(i32::MAX);
            let row = journal_line_items::ActiveModel {
                id: Set(Uuid::now_v7()),
                tenant_id: Set(input.tenant_id.into_inner()),
                journal_entry_id: Set(entry.id),
                account_id: Set(line.account_id),
                line_order: Set(line_order),
                debit: Set(line.debit),
                credit: Set(line.credit),
                memo: Set(line.memo.clone()),
                created_at: Set(now),
            };
            lines.push(row.insert(txn).await?);
        }

        if posted {
            Self::apply_balance_changes(txn, &resolved).await?;
        }

        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Loads an entry's line items resolved against their accounts.
    async fn load_resolved_lines(
        txn: &DatabaseTransaction,
        entry_id: Uuid,
    ) -> Result<Vec<ResolvedLineItem>, JournalRepoError> {
        let lines = journal_line_items::Entity::find()
            .filter(journal_line_items::Column::JournalEntryId.eq(entry_id))
            .order_by_asc(journal_line_items::Column::LineOrder)
            .all(txn)
            .await?;
        let account_ids: Vec<Uuid> = lines.iter().map(|l| l.account_id).collect();
        let account_map = load_account_info_map(txn, &account_ids).await?;

        lines
            .into_iter()
            .map(|l| {
                let info = account_map
                    .get(&l.account_id)
                    .ok_or(LedgerError::AccountNotFound(l.account_id))?;
                Ok(ResolvedLineItem {
                    account_id: l.account_id,
                    account_type: info.account_type,
                    debit: l.debit,
                    credit: l.credit,
                    memo: l.memo,
                })
            })
            .collect()
    }

    /// Applies the per-account balance deltas for a set of posted
    /// lines with in-database arithmetic.
    async fn apply_balance_changes(
        txn: &DatabaseTransaction,
        resolved: &[ResolvedLineItem],
    ) -> Result<(), JournalRepoError> {
        let mut deltas: std::collections::HashMap<Uuid, Decimal> =
            std::collections::HashMap::new();
        for line in resolved {
            *deltas.entry(line.account_id).or_default() +=
                balance_change(line.account_type, line.debit, line.credit);
        }

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        for (account_id, delta) in deltas {
            crate::entities::accounts::Entity::update_many()
                .col_expr(
                    crate::entities::accounts::Column::Balance,
                    Expr::col(crate::entities::accounts::Column::Balance).add(delta),
                )
                .col_expr(
                    crate::entities::accounts::Column::UpdatedAt,
                    Expr::value(now),
                )
                .filter(crate::entities::accounts::Column::Id.eq(account_id))
                .exec(txn)
                .await?;
        }
        Ok(())
    }
}

/// Formats a tenant-scoped journal entry number.
#[must_use]
pub fn format_entry_number(sequence: u64) -> String {
    format!("JE-{sequence:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_number_format() {
        assert_eq!(format_entry_number(1), "JE-000001");
        assert_eq!(format_entry_number(42), "JE-000042");
        assert_eq!(format_entry_number(1_234_567), "JE-1234567");
    }
}
