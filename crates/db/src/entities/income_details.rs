//! `SeaORM` Entity for the income_details table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "income_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub amount: Decimal,
    pub currency_code: Option<String>,
    pub received_at: DateTimeWithTimeZone,
    pub hijri_received: Option<String>,
    pub source_name: Option<String>,
    pub is_zakath_eligible: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
