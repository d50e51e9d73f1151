//! `SeaORM` entity for the cash_transactions table.
//!
//! Raw verified-cash collections reconciled against bank deposits.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cash_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub amount: Decimal,
    pub collected_at: DateTimeWithTimeZone,
    pub is_verified: bool,
    pub deposit_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_deposits::Entity",
        from = "Column::DepositId",
        to = "super::bank_deposits::Column::Id"
    )]
    BankDeposits,
}

impl Related<super::bank_deposits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankDeposits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
