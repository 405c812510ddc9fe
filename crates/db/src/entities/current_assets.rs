//! `SeaORM` Entity for the current_assets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "current_assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub item_name: String,
    pub category_name: String,
    pub category_tag: Option<String>,
    pub current_value: Decimal,
    pub quantity: Decimal,
    pub currency_code: Option<String>,
    pub acquired_at: DateTimeWithTimeZone,
    pub hijri_acquired: Option<String>,
    pub is_zakath_applicable: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
