//! Matching repository for three-way match database operations.
//!
//! Document exclusivity is validated from the loaded snapshot and
//! enforced again by unique indexes on the match table, so a racing
//! second match fails on commit.

use chrono::Utc;
use diagna_core::matching::{
    MatchInput, MatchStatus, MatchTolerance, MatchedDocument, MatchingEngine, MatchingError,
};
use diagna_shared::types::{TenantId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    goods_receipts, purchase_orders, sea_orm_active_enums, three_way_matches, vendor_invoices,
};
use crate::rls::set_rls_context;

/// Error types for matching operations.
#[derive(Debug, thiserror::Error)]
pub enum MatchingRepoError {
    /// Domain-level matching error.
    #[error(transparent)]
    Matching(#[from] MatchingError),

    /// Concurrent modification detected.
    #[error("Match was modified concurrently, please retry")]
    ConcurrentModification,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Matching repository for three-way match operations.
#[derive(Debug, Clone)]
pub struct MatchingRepository {
    db: DatabaseConnection,
}

impl MatchingRepository {
    /// Creates a new matching repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Performs a three-way match across a PO, receipt, and invoice.
    ///
    /// On success the match row is inserted, the invoice moves to
    /// Matched, and the PO moves to Executed, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns document lookup failures, exclusivity and reference
    /// violations from the matching engine, or a database error.
    pub async fn perform_match(
        &self,
        tenant_id: TenantId,
        po_id: Uuid,
        receipt_id: Uuid,
        invoice_id: Uuid,
        created_by: UserId,
        tolerance: &MatchTolerance,
    ) -> Result<three_way_matches::Model, MatchingRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let po = purchase_orders::Entity::find_by_id(po_id)
            .one(&txn)
            .await?
            .ok_or(MatchingError::DocumentNotFound {
                document: MatchedDocument::PurchaseOrder,
            })?;
        let receipt = goods_receipts::Entity::find_by_id(receipt_id)
            .one(&txn)
            .await?
            .ok_or(MatchingError::DocumentNotFound {
                document: MatchedDocument::GoodsReceipt,
            })?;
        let invoice = vendor_invoices::Entity::find_by_id(invoice_id)
            .one(&txn)
            .await?
            .ok_or(MatchingError::DocumentNotFound {
                document: MatchedDocument::VendorInvoice,
            })?;

        let input = MatchInput {
            po_id: po.id,
            po_status: po.status.clone().into(),
            po_amount: po.total_amount,
            po_already_matched: Self::is_matched(&txn, three_way_matches::Column::PurchaseOrderId, po.id)
                .await?,
            receipt_id: receipt.id,
            receipt_po_id: receipt.purchase_order_id,
            receipt_already_matched: Self::is_matched(
                &txn,
                three_way_matches::Column::GoodsReceiptId,
                receipt.id,
            )
            .await?,
            invoice_id: invoice.id,
            invoice_amount: invoice.total_amount,
            invoice_already_matched: Self::is_matched(
                &txn,
                three_way_matches::Column::VendorInvoiceId,
                invoice.id,
            )
            .await?,
        };
        let computation = MatchingEngine::perform_match(&input, tolerance)?;

        let now = Utc::now().into();
        let row = three_way_matches::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(tenant_id.into_inner()),
            purchase_order_id: Set(po.id),
            goods_receipt_id: Set(receipt.id),
            vendor_invoice_id: Set(invoice.id),
            variance: Set(computation.variance),
            tolerance: Set(computation.tolerance),
            status: Set(computation.status.into()),
            created_by: Set(created_by.into_inner()),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let row = row.insert(&txn).await?;

        let mut invoice_active: vendor_invoices::ActiveModel = invoice.into();
        invoice_active.status = Set(sea_orm_active_enums::VendorInvoiceStatus::Matched);
        invoice_active.updated_at = Set(now);
        invoice_active.update(&txn).await?;

        let mut po_active: purchase_orders::ActiveModel = po.into();
        po_active.status = Set(sea_orm_active_enums::PurchaseOrderStatus::Executed);
        po_active.updated_at = Set(now);
        po_active.update(&txn).await?;

        txn.commit().await?;
        info!(
            match_id = %row.id,
            status = computation.status.as_str(),
            variance = %row.variance,
            "Three-way match performed"
        );
        Ok(row)
    }

    /// Manually clears a discrepancy within the approver's limit.
    ///
    /// # Errors
    ///
    /// Returns `NotADiscrepancy`, `VarianceExceedsLimit`, a concurrency
    /// error if a racing writer changed the match, or a database error.
    pub async fn approve_discrepancy(
        &self,
        tenant_id: TenantId,
        match_id: Uuid,
        approved_by: UserId,
        approver_limit: Decimal,
    ) -> Result<three_way_matches::Model, MatchingRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let row = three_way_matches::Entity::find_by_id(match_id)
            .one(&txn)
            .await?
            .ok_or(MatchingError::MatchNotFound)?;
        let new_status =
            MatchingEngine::approve_discrepancy(row.status.clone().into(), row.variance, approver_limit)?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let db_new: sea_orm_active_enums::MatchStatus = new_status.into();
        let result = three_way_matches::Entity::update_many()
            .col_expr(three_way_matches::Column::Status, db_new.as_enum())
            .col_expr(
                three_way_matches::Column::ApprovedBy,
                Expr::value(Some(approved_by.into_inner())),
            )
            .col_expr(three_way_matches::Column::ApprovedAt, Expr::value(Some(now)))
            .col_expr(three_way_matches::Column::UpdatedAt, Expr::value(now))
            .filter(three_way_matches::Column::Id.eq(match_id))
            .filter(
                three_way_matches::Column::Status
                    .eq(sea_orm_active_enums::MatchStatus::Discrepancy),
            )
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(MatchingRepoError::ConcurrentModification);
        }

        let updated = three_way_matches::Entity::find_by_id(match_id)
            .one(&txn)
            .await?
            .ok_or(MatchingError::MatchNotFound)?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Checks that payment may be scheduled against a match.
    ///
    /// # Errors
    ///
    /// Returns `MatchNotFound`, `PaymentBlocked` for uncleared
    /// discrepancies, or a database error.
    pub async fn validate_payment_allowed(
        &self,
        tenant_id: TenantId,
        match_id: Uuid,
    ) -> Result<MatchStatus, MatchingRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let row = three_way_matches::Entity::find_by_id(match_id)
            .one(&txn)
            .await?
            .ok_or(MatchingError::MatchNotFound)?;
        let status: MatchStatus = row.status.into();
        MatchingEngine::validate_payment_allowed(status)?;

        txn.commit().await?;
        Ok(status)
    }

    /// Returns whether a document column already appears in any match.
    async fn is_matched(
        txn: &DatabaseTransaction,
        column: three_way_matches::Column,
        id: Uuid,
    ) -> Result<bool, DbErr> {
        let count = three_way_matches::Entity::find()
            .filter(column.eq(id))
            .count(txn)
            .await?;
        Ok(count > 0)
    }
}
