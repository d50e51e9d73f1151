//! Reconciliation repository for cash deposit database operations.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use diagna_core::reconciliation::{
    DepositMethod, ReconciliationEngine, ReconciliationError, UndepositedCash, VarianceReport,
    VerifiedCashTransaction, VerifyDecision,
};
use diagna_shared::types::{BranchId, TenantId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{bank_deposits, cash_transactions, sea_orm_active_enums};
use crate::rls::set_rls_context;

/// Error types for reconciliation operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationRepoError {
    /// Domain-level reconciliation error.
    #[error(transparent)]
    Reconciliation(#[from] ReconciliationError),

    /// A referenced cash transaction is missing, unverified, or
    /// already linked to a deposit.
    #[error("One or more cash transactions are unavailable for deposit")]
    CashTransactionUnavailable,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording a bank deposit.
#[derive(Debug, Clone)]
pub struct RecordDepositInput {
    /// Tenant scope.
    pub tenant_id: TenantId,
    /// Branch scope, when branch specific.
    pub branch_id: Option<BranchId>,
    /// The deposited amount.
    pub amount: Decimal,
    /// How the cash reached the bank.
    pub method: DepositMethod,
    /// When the deposit was made.
    pub deposited_at: DateTime<Utc>,
    /// Who recorded the deposit.
    pub created_by: UserId,
    /// The verified cash transactions this deposit covers.
    pub cash_transaction_ids: Vec<Uuid>,
}

/// Reconciliation repository for deposits and variance reporting.
#[derive(Debug, Clone)]
pub struct ReconciliationRepository {
    db: DatabaseConnection,
}

impl ReconciliationRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sums the verified cash collected since the last verified
    /// deposit.
    ///
    /// # Errors
    ///
    /// Returns a database error if the queries fail.
    pub async fn undeposited_cash(
        &self,
        tenant_id: TenantId,
    ) -> Result<UndepositedCash, ReconciliationRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let cutoff = Self::last_verified_deposit_at(&txn, tenant_id.into_inner()).await?;
        let transactions = Self::load_unlinked_verified(&txn, tenant_id.into_inner()).await?;

        txn.commit().await?;
        Ok(ReconciliationEngine::undeposited_cash(&transactions, cutoff))
    }

    /// Records a deposit, linking its cash transactions.
    ///
    /// A deposit whose amount differs from the linked cash beyond the
    /// rounding tolerance starts out flagged with a recorded
    /// discrepancy.
    ///
    /// # Errors
    ///
    /// Returns `AmountNotPositive`, a cash-availability error, or a
    /// database error.
    pub async fn record_deposit(
        &self,
        input: RecordDepositInput,
        rounding_tolerance: Decimal,
    ) -> Result<bank_deposits::Model, ReconciliationRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, input.tenant_id.into_inner()).await?;

        let linked = cash_transactions::Entity::find()
            .filter(cash_transactions::Column::Id.is_in(input.cash_transaction_ids.iter().copied()))
            .filter(cash_transactions::Column::IsVerified.eq(true))
            .filter(cash_transactions::Column::DepositId.is_null())
            .all(&txn)
            .await?;
        if linked.len() != input.cash_transaction_ids.len() {
            return Err(ReconciliationRepoError::CashTransactionUnavailable);
        }
        let linked_cash_amount: Decimal = linked.iter().map(|t| t.amount).sum();

        let classification = ReconciliationEngine::classify_deposit(
            input.amount,
            linked_cash_amount,
            rounding_tolerance,
        )?;

        let now = Utc::now().into();
        let deposit = bank_deposits::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(input.tenant_id.into_inner()),
            branch_id: Set(input.branch_id.map(BranchId::into_inner)),
            amount: Set(input.amount),
            linked_cash_amount: Set(linked_cash_amount),
            method: Set(input.method.into()),
            status: Set(classification.status.into()),
            discrepancy_amount: Set(classification.discrepancy_amount),
            discrepancy_reason: Set(classification.discrepancy_reason),
            deposited_at: Set(input.deposited_at.into()),
            verified_by: Set(None),
            verified_at: Set(None),
            created_by: Set(input.created_by.into_inner()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let deposit = deposit.insert(&txn).await?;

        // Re-assert availability in the update itself; a racing deposit
        // that linked any of these rows first shrinks the affected count
        // and rolls this one back.
        let linked_rows = cash_transactions::Entity::update_many()
            .col_expr(
                cash_transactions::Column::DepositId,
                Expr::value(Some(deposit.id)),
            )
            .filter(
                cash_transactions::Column::Id.is_in(input.cash_transaction_ids.iter().copied()),
            )
            .filter(cash_transactions::Column::IsVerified.eq(true))
            .filter(cash_transactions::Column::DepositId.is_null())
            .exec(&txn)
            .await?;
        if !Self::all_requested_linked(input.cash_transaction_ids.len(), linked_rows.rows_affected)
        {
            return Err(ReconciliationRepoError::CashTransactionUnavailable);
        }

        txn.commit().await?;
        info!(
            deposit_id = %deposit.id,
            amount = %deposit.amount,
            status = classification.status.as_str(),
            "Bank deposit recorded"
        );
        Ok(deposit)
    }

    /// Applies a reviewer's verdict to a pending or flagged deposit.
    ///
    /// Verified deposits are immutable; a second verification fails.
    ///
    /// # Errors
    ///
    /// Returns `DepositNotFound`, `AlreadyVerified` (also when a
    /// racing reviewer won), `RejectionReasonRequired`, or a database
    /// error.
    pub async fn verify_deposit(
        &self,
        tenant_id: TenantId,
        deposit_id: Uuid,
        verified_by: UserId,
        decision: &VerifyDecision,
    ) -> Result<bank_deposits::Model, ReconciliationRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let deposit = bank_deposits::Entity::find_by_id(deposit_id)
            .one(&txn)
            .await?
            .ok_or(ReconciliationError::DepositNotFound)?;
        let loaded: sea_orm_active_enums::DepositStatus = deposit.status.clone();
        let new_status = ReconciliationEngine::verify_deposit(deposit.status.into(), decision)?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let db_new: sea_orm_active_enums::DepositStatus = new_status.into();
        let mut update = bank_deposits::Entity::update_many()
            .col_expr(bank_deposits::Column::Status, db_new.as_enum())
            .col_expr(bank_deposits::Column::UpdatedAt, Expr::value(now))
            .filter(bank_deposits::Column::Id.eq(deposit_id))
            .filter(bank_deposits::Column::Status.eq(loaded));

        match decision {
            VerifyDecision::Accept => {
                update = update
                    .col_expr(
                        bank_deposits::Column::VerifiedBy,
                        Expr::value(Some(verified_by.into_inner())),
                    )
                    .col_expr(bank_deposits::Column::VerifiedAt, Expr::value(Some(now)));
            }
            VerifyDecision::Reject { reason } => {
                update = update.col_expr(
                    bank_deposits::Column::DiscrepancyReason,
                    Expr::value(Some(reason.clone())),
                );
            }
        }

        let result = update.exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(ReconciliationError::AlreadyVerified.into());
        }

        let updated = bank_deposits::Entity::find_by_id(deposit_id)
            .one(&txn)
            .await?
            .ok_or(ReconciliationError::DepositNotFound)?;

        txn.commit().await?;
        info!(deposit_id = %deposit_id, status = new_status.as_str(), "Bank deposit verified");
        Ok(updated)
    }

    /// Builds the collected-versus-deposited oversight report.
    ///
    /// # Errors
    ///
    /// Returns a database error if the queries fail.
    pub async fn variance_report(
        &self,
        tenant_id: TenantId,
        as_of: NaiveDate,
    ) -> Result<VarianceReport, ReconciliationRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let year_start = as_of
            .with_day(1)
            .and_then(|d| d.with_month(1))
            .unwrap_or(as_of);
        let window_start = year_start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);

        let collections: Vec<(NaiveDate, Decimal)> = cash_transactions::Entity::find()
            .filter(cash_transactions::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(cash_transactions::Column::IsVerified.eq(true))
            .filter(cash_transactions::Column::CollectedAt.gte(window_start))
            .all(&txn)
            .await?
            .into_iter()
            .map(|t| (t.collected_at.date_naive(), t.amount))
            .collect();

        let deposits: Vec<(NaiveDate, Decimal)> = bank_deposits::Entity::find()
            .filter(bank_deposits::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(bank_deposits::Column::Status.eq(sea_orm_active_enums::DepositStatus::Verified))
            .filter(bank_deposits::Column::DepositedAt.gte(window_start))
            .all(&txn)
            .await?
            .into_iter()
            .map(|d| (d.deposited_at.date_naive(), d.amount))
            .collect();

        txn.commit().await?;
        Ok(ReconciliationEngine::variance_report(
            &collections,
            &deposits,
            as_of,
        ))
    }

    /// The verification time of the most recent verified deposit.
    async fn last_verified_deposit_at(
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, DbErr> {
        let latest = bank_deposits::Entity::find()
            .filter(bank_deposits::Column::TenantId.eq(tenant_id))
            .filter(bank_deposits::Column::Status.eq(sea_orm_active_enums::DepositStatus::Verified))
            .order_by_desc(bank_deposits::Column::VerifiedAt)
            .limit(1)
            .one(txn)
            .await?;
        Ok(latest
            .and_then(|d| d.verified_at)
            .map(|at| at.with_timezone(&Utc)))
    }

    /// Whether the guarded link update covered every requested
    /// transaction. Fewer affected rows means another deposit claimed
    /// one of them between the read and the update.
    fn all_requested_linked(requested: usize, linked: u64) -> bool {
        u64::try_from(requested).is_ok_and(|n| n == linked)
    }

    /// Verified cash transactions not yet linked to any deposit.
    async fn load_unlinked_verified(
        txn: &DatabaseTransaction,
        tenant_id: Uuid,
    ) -> Result<Vec<VerifiedCashTransaction>, DbErr> {
        let rows = cash_transactions::Entity::find()
            .filter(cash_transactions::Column::TenantId.eq(tenant_id))
            .filter(cash_transactions::Column::IsVerified.eq(true))
            .filter(cash_transactions::Column::DepositId.is_null())
            .all(txn)
            .await?;
        Ok(rows
            .into_iter()
            .map(|t| VerifiedCashTransaction {
                id: t.id,
                amount: t.amount,
                collected_at: t.collected_at.with_timezone(&Utc),
            })
            .collect())
    }
}
