//! `SeaORM` entity for the referral_invoices table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ReferralInvoiceStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "referral_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub provider_id: Uuid,
    pub invoice_number: String,
    pub period_start: Date,
    pub period_end: Date,
    pub total_commission: Decimal,
    pub status: ReferralInvoiceStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::referral_providers::Entity",
        from = "Column::ProviderId",
        to = "super::referral_providers::Column::Id"
    )]
    ReferralProviders,
    #[sea_orm(has_many = "super::referral_invoice_items::Entity")]
    ReferralInvoiceItems,
}

impl Related<super::referral_providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferralProviders.def()
    }
}

impl Related<super::referral_invoice_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferralInvoiceItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
