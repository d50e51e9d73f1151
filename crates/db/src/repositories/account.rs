//! Account repository for chart of accounts database operations.

use std::collections::HashMap;

use chrono::Utc;
use diagna_core::ledger::{standard_chart, AccountInfo, LedgerError};
use diagna_shared::types::{BranchId, TenantId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::accounts;
use crate::rls::set_rls_context;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountRepoError {
    /// Domain-level ledger error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Seeds the standard chart of accounts for a tenant.
    ///
    /// Runs exactly once per tenant; a second call fails without
    /// touching existing accounts.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if the tenant already has accounts,
    /// or a database error.
    pub async fn initialize_chart(
        &self,
        tenant_id: TenantId,
        branch_id: Option<BranchId>,
    ) -> Result<Vec<accounts::Model>, AccountRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let existing = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .count(&txn)
            .await?;
        if existing > 0 {
            return Err(LedgerError::AlreadyInitialized(tenant_id.into_inner()).into());
        }

        let now = Utc::now().into();
        let mut created = Vec::new();
        for template in standard_chart() {
            let account = accounts::ActiveModel {
                id: Set(Uuid::now_v7()),
                tenant_id: Set(tenant_id.into_inner()),
                branch_id: Set(branch_id.map(BranchId::into_inner)),
                code: Set(template.code.to_string()),
                name: Set(template.name.to_string()),
                account_type: Set(template.account_type.into()),
                subtype: Set(template.subtype.to_string()),
                balance: Set(rust_decimal::Decimal::ZERO),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            };
            created.push(account.insert(&txn).await?);
        }

        txn.commit().await?;
        info!(
            tenant_id = %tenant_id.into_inner(),
            accounts = created.len(),
            "Chart of accounts initialized"
        );
        Ok(created)
    }

    /// Finds an account by its code within a tenant.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn find_by_code(
        &self,
        tenant_id: TenantId,
        code: &str,
    ) -> Result<Option<accounts::Model>, AccountRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let account = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(accounts::Column::Code.eq(code))
            .one(&txn)
            .await?;

        txn.commit().await?;
        Ok(account)
    }

    /// Lists the tenant's accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list(&self, tenant_id: TenantId) -> Result<Vec<accounts::Model>, AccountRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let accounts = accounts::Entity::find()
            .filter(accounts::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_asc(accounts::Column::Code)
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(accounts)
    }

    /// Deactivates an account so new postings are rejected.
    ///
    /// Historical line items keep referencing the account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` or a database error.
    pub async fn deactivate(
        &self,
        tenant_id: TenantId,
        account_id: Uuid,
    ) -> Result<accounts::Model, AccountRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let account = accounts::Entity::find_by_id(account_id)
            .one(&txn)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let mut active: accounts::ActiveModel = account.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }
}

/// Loads validation info for a set of accounts into a map.
///
/// Journal validation runs against this preloaded map so the
/// injected validator closure stays synchronous.
pub(crate) async fn load_account_info_map(
    txn: &DatabaseTransaction,
    account_ids: &[Uuid],
) -> Result<HashMap<Uuid, AccountInfo>, DbErr> {
    let rows = accounts::Entity::find()
        .filter(accounts::Column::Id.is_in(account_ids.iter().copied()))
        .all(txn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|a| {
            (
                a.id,
                AccountInfo {
                    id: a.id,
                    is_active: a.is_active,
                    account_type: a.account_type.into(),
                },
            )
        })
        .collect())
}
