//! `SeaORM` entity for the provider_ledger_entries table.
//!
//! Running balance of what each referral provider is owed. Credits
//! accrue from period invoices, debits from settlements.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_ledger_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub provider_id: Uuid,
    pub settlement_id: Option<Uuid>,
    pub referral_invoice_id: Option<Uuid>,
    pub debit: Decimal,
    pub credit: Decimal,
    pub balance_after: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::referral_providers::Entity",
        from = "Column::ProviderId",
        to = "super::referral_providers::Column::Id"
    )]
    ReferralProviders,
}

impl Related<super::referral_providers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferralProviders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
