//! `SeaORM` entity for the settlements table.
//!
//! A unique index on `referral_invoice_id` enforces one settlement
//! per invoice.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::PaymentMethod;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "settlements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub referral_invoice_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub journal_entry_id: Option<Uuid>,
    pub settled_by: Uuid,
    pub settled_at: DateTimeWithTimeZone,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::referral_invoices::Entity",
        from = "Column::ReferralInvoiceId",
        to = "super::referral_invoices::Column::Id"
    )]
    ReferralInvoices,
}

impl Related<super::referral_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferralInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
