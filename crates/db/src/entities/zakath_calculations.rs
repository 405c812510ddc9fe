//! `SeaORM` Entity for the zakath_calculations table.
//!
//! Rows are append-only; nothing in the application updates or deletes
//! a persisted snapshot.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "zakath_calculations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub calculated_at: DateTimeWithTimeZone,
    pub hijri_label: Option<String>,
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub nisab_threshold: Decimal,
    pub zakath_amount: Decimal,
    pub zakath_percentage: Decimal,
    pub cash_total: Decimal,
    pub gold_total: Decimal,
    pub silver_total: Decimal,
    pub investments_total: Decimal,
    pub other_total: Decimal,
    pub base_currency: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
