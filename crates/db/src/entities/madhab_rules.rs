//! `SeaORM` Entity for the madhab_rules table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "madhab_rules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub madhab_id: i32,
    pub rule_type: String,
    pub nisab_value: Decimal,
    pub zakath_percentage: Decimal,
    pub hawl_period_days: i32,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
