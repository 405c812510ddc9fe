//! The zakath calculation engine.
//!
//! Pulls a user's financial records through its collaborators, converts
//! every amount into one base currency, buckets assets into zakath
//! categories, applies the lunar hawl window, compares net wealth against
//! the madhab's nisab threshold, and persists an append-only calculation
//! snapshot.

pub mod category;
pub mod engine;
pub mod error;
pub mod traits;
pub mod types;


pub use category::{AssetBucket, classify_label};
pub use engine::ZakathEngine;
pub use error::ZakathError;
pub use traits::{CalculationStore, FinancialRecordReader};
pub use types::{
    AssetRecord, BucketTotals, CalculationResult, CalculationSnapshot, CreateCalculationInput,
    ExpenseRecord, IncomeRecord, MadhabRule, RuleType,
};
