//! Commission repository for referral invoice and settlement
//! database operations.
//!
//! Period invoices, their line items, and the provider ledger credit
//! are committed together; settlement writes the payout, the provider
//! ledger debit, and the ledger posting in one transaction.

use chrono::{NaiveDate, Utc};
use diagna_core::commission::{
    CommissionEngine, CommissionError, PaymentMethod, ProviderTerms, QualifyingInvoice,
    SettlementInput,
};
use diagna_core::ledger::{CreateJournalEntryInput, Reference, ReferenceType};
use diagna_shared::types::{ReferralProviderId, TenantId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    provider_ledger_entries, referral_invoice_items, referral_invoices, referral_providers,
    sea_orm_active_enums, settlements,
};
use crate::repositories::journal::{JournalRepoError, JournalRepository};
use crate::rls::set_rls_context;

/// Error types for commission operations.
#[derive(Debug, thiserror::Error)]
pub enum CommissionRepoError {
    /// Domain-level commission error.
    #[error(transparent)]
    Commission(#[from] CommissionError),

    /// The settlement ledger posting failed.
    #[error(transparent)]
    Posting(#[from] JournalRepoError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Ledger accounts for the settlement posting.
#[derive(Debug, Clone, Copy)]
pub struct SettlementAccounts {
    /// The commissions payable account to debit.
    pub payable_account_id: Uuid,
    /// The cash or bank account to credit.
    pub paying_account_id: Uuid,
}

/// A referral invoice with its line items.
#[derive(Debug, Clone)]
pub struct InvoiceWithItems {
    /// Invoice header.
    pub invoice: referral_invoices::Model,
    /// One item per billed service.
    pub items: Vec<referral_invoice_items::Model>,
}

/// Commission repository for referral invoicing and settlement.
#[derive(Debug, Clone)]
pub struct CommissionRepository {
    db: DatabaseConnection,
}

impl CommissionRepository {
    /// Creates a new commission repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Generates a provider's period invoice from the qualifying
    /// patient invoices the caller loaded from billing.
    ///
    /// Inserts the invoice, its items, and the provider ledger credit
    /// in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotFound`, period and activity errors from the
    /// commission engine, or a database error.
    pub async fn generate_period_invoice(
        &self,
        tenant_id: TenantId,
        provider_id: ReferralProviderId,
        period_start: NaiveDate,
        period_end: NaiveDate,
        qualifying: &[QualifyingInvoice],
    ) -> Result<InvoiceWithItems, CommissionRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let provider = referral_providers::Entity::find_by_id(provider_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(CommissionError::ProviderNotFound)?;
        let terms = ProviderTerms {
            provider_id,
            commission_rate: provider.commission_rate,
            is_active: provider.is_active,
        };

        let aggregate =
            CommissionEngine::generate_period_invoice(&terms, period_start, period_end, qualifying)?;

        let sequence = referral_invoices::Entity::find()
            .filter(referral_invoices::Column::TenantId.eq(tenant_id.into_inner()))
            .filter(referral_invoices::Column::PeriodStart.eq(period_start))
            .count(&txn)
            .await?;
        let invoice_number = CommissionEngine::period_invoice_number(
            period_start,
            u32::try_from(sequence + 1).unwrap_or(u32::MAX),
        );

        let now = Utc::now().into();
        let invoice = referral_invoices::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(tenant_id.into_inner()),
            provider_id: Set(provider_id.into_inner()),
            invoice_number: Set(invoice_number),
            period_start: Set(period_start),
            period_end: Set(period_end),
            total_commission: Set(aggregate.total_commission),
            status: Set(sea_orm_active_enums::ReferralInvoiceStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let invoice = invoice.insert(&txn).await?;

        let mut items = Vec::with_capacity(aggregate.line_items.len());
        for line in &aggregate.line_items {
            let item = referral_invoice_items::ActiveModel {
                id: Set(Uuid::now_v7()),
                tenant_id: Set(tenant_id.into_inner()),
                referral_invoice_id: Set(invoice.id),
                billing_invoice_id: Set(line.invoice_id),
                test_id: Set(line.test_id),
                service_date: Set(line.service_date),
                price: Set(line.price),
                commission: Set(line.commission),
                created_at: Set(now),
            };
            items.push(item.insert(&txn).await?);
        }

        Self::insert_ledger_row(
            &txn,
            tenant_id,
            provider_id,
            None,
            Some(invoice.id),
            Decimal::ZERO,
            aggregate.total_commission,
        )
        .await?;

        txn.commit().await?;
        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total_commission = %invoice.total_commission,
            "Referral invoice generated"
        );
        Ok(InvoiceWithItems { invoice, items })
    }

    /// Settles a referral invoice, posting the payout to the ledger.
    ///
    /// Writes the settlement, the provider ledger debit, the journal
    /// entry, and the invoice's Paid flip in one transaction.
    ///
    /// # Errors
    ///
    /// Returns settlement validation errors from the commission
    /// engine, `AlreadySettled` if a racing settlement won, or a
    /// database error.
    pub async fn settle_invoice(
        &self,
        tenant_id: TenantId,
        invoice_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        settled_by: UserId,
        accounts: SettlementAccounts,
    ) -> Result<settlements::Model, CommissionRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let invoice = referral_invoices::Entity::find_by_id(invoice_id)
            .one(&txn)
            .await?
            .ok_or(CommissionError::InvoiceNotFound)?;
        let already_settled = settlements::Entity::find()
            .filter(settlements::Column::ReferralInvoiceId.eq(invoice_id))
            .count(&txn)
            .await?
            > 0;

        CommissionEngine::validate_settlement(&SettlementInput {
            invoice_total: invoice.total_commission,
            already_settled,
            amount,
            method,
        })?;

        let entry_input = CreateJournalEntryInput {
            tenant_id,
            branch_id: None,
            entry_date: Utc::now().date_naive(),
            description: format!("Commission settlement for {}", invoice.invoice_number),
            reference: Some(Reference {
                reference_type: ReferenceType::CommissionSettlement,
                reference_id: invoice.id.to_string(),
            }),
            line_items: CommissionEngine::settlement_journal_lines(
                amount,
                accounts.payable_account_id,
                accounts.paying_account_id,
            ),
            created_by: settled_by,
        };
        let journal_entry = JournalRepository::insert_posted_entry(&txn, &entry_input).await?;

        let now = Utc::now().into();
        let settlement = settlements::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(tenant_id.into_inner()),
            referral_invoice_id: Set(invoice.id),
            amount: Set(amount),
            method: Set(method.into()),
            journal_entry_id: Set(Some(journal_entry.id)),
            settled_by: Set(settled_by.into_inner()),
            settled_at: Set(now),
            created_at: Set(now),
        };
        let settlement = settlement.insert(&txn).await?;

        Self::insert_ledger_row(
            &txn,
            tenant_id,
            ReferralProviderId::from_uuid(invoice.provider_id),
            Some(settlement.id),
            Some(invoice.id),
            amount,
            Decimal::ZERO,
        )
        .await?;

        let flipped = referral_invoices::Entity::update_many()
            .col_expr(
                referral_invoices::Column::Status,
                sea_orm_active_enums::ReferralInvoiceStatus::Paid.as_enum(),
            )
            .col_expr(
                referral_invoices::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
            )
            .filter(referral_invoices::Column::Id.eq(invoice.id))
            .filter(
                referral_invoices::Column::Status
                    .eq(sea_orm_active_enums::ReferralInvoiceStatus::Pending),
            )
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            return Err(CommissionError::AlreadySettled.into());
        }

        txn.commit().await?;
        info!(
            settlement_id = %settlement.id,
            invoice_id = %invoice_id,
            amount = %amount,
            "Referral invoice settled"
        );
        Ok(settlement)
    }

    /// Returns the provider's current owed balance from the running
    /// ledger, zero when no rows exist.
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn provider_balance(
        &self,
        tenant_id: TenantId,
        provider_id: ReferralProviderId,
    ) -> Result<Decimal, CommissionRepoError> {
        let txn = self.db.begin().await?;
        set_rls_context(&txn, tenant_id.into_inner()).await?;

        let balance = Self::latest_balance(&txn, provider_id.into_inner()).await?;

        txn.commit().await?;
        Ok(balance)
    }

    /// Appends one provider ledger row carrying the running balance.
    async fn insert_ledger_row(
        txn: &DatabaseTransaction,
        tenant_id: TenantId,
        provider_id: ReferralProviderId,
        settlement_id: Option<Uuid>,
        referral_invoice_id: Option<Uuid>,
        debit: Decimal,
        credit: Decimal,
    ) -> Result<(), CommissionRepoError> {
        let balance = Self::latest_balance(txn, provider_id.into_inner()).await?;
        let row = provider_ledger_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            tenant_id: Set(tenant_id.into_inner()),
            provider_id: Set(provider_id.into_inner()),
            settlement_id: Set(settlement_id),
            referral_invoice_id: Set(referral_invoice_id),
            debit: Set(debit),
            credit: Set(credit),
            balance_after: Set(balance + credit - debit),
            created_at: Set(Utc::now().into()),
        };
        row.insert(txn).await?;
        Ok(())
    }

    /// The most recent running balance for a provider.
    async fn latest_balance(
        txn: &DatabaseTransaction,
        provider_id: Uuid,
    ) -> Result<Decimal, DbErr> {
        let latest = provider_ledger_entries::Entity::find()
            .filter(provider_ledger_entries::Column::ProviderId.eq(provider_id))
            .order_by_desc(provider_ledger_entries::Column::CreatedAt)
            .limit(1)
            .one(txn)
            .await?;
        Ok(latest.map(|r| r.balance_after).unwrap_or(Decimal::ZERO))
    }
}
