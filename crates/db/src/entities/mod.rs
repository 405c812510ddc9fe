//! `SeaORM` entity definitions.

pub mod currencies;
pub mod current_assets;
pub mod exchange_rates;
pub mod expense_details;
pub mod income_details;
pub mod madhab_rules;
pub mod zakath_calculations;
