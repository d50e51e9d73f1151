//! `SeaORM` entity for the referral_invoice_items table.
//!
//! One row per billed service aggregated onto a referral invoice.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "referral_invoice_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub referral_invoice_id: Uuid,
    pub billing_invoice_id: Uuid,
    pub test_id: Uuid,
    pub service_date: Date,
    pub price: Decimal,
    pub commission: Decimal,
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
