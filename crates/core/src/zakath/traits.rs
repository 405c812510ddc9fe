//! Collaborator traits consumed by the engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use zakath_shared::types::{CalculationId, MadhabId, UserId};

use super::error::ZakathError;
use super::types::{
    AssetRecord, CalculationSnapshot, CreateCalculationInput, ExpenseRecord, IncomeRecord,
    MadhabRule, RuleType,
};

/// Read access to a user's financial records and madhab rules.
#[async_trait]
pub trait FinancialRecordReader: Send + Sync {
    /// All zakath-applicable assets for the user.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn zakath_applicable_assets(&self, user: UserId)
    -> Result<Vec<AssetRecord>, ZakathError>;

    /// Zakath-eligible income received on or after `since`.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn eligible_income_since(
        &self,
        user: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<IncomeRecord>, ZakathError>;

    /// All expenses transacted on or after `since`.
    ///
    /// Expenses carry no eligibility flag; every one in the window counts.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn expenses_since(
        &self,
        user: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExpenseRecord>, ZakathError>;

    /// The active rule of the given type for a madhab, if any.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn active_rule_of_type(
        &self,
        madhab: MadhabId,
        rule_type: RuleType,
    ) -> Result<Option<MadhabRule>, ZakathError>;

    /// Any active rule for a madhab (used for the percentage lookup,
    /// which is not restricted by rule type).
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn active_rule(&self, madhab: MadhabId) -> Result<Option<MadhabRule>, ZakathError>;
}

/// Append-only persistence for calculation snapshots.
#[async_trait]
pub trait CalculationStore: Send + Sync {
    /// Persists a new snapshot and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn insert(
        &self,
        input: CreateCalculationInput,
    ) -> Result<CalculationSnapshot, ZakathError>;

    /// Snapshots for a user, newest first, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn list_by_user(
        &self,
        user: UserId,
        limit: u64,
    ) -> Result<Vec<CalculationSnapshot>, ZakathError>;

    /// A single snapshot by id.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    async fn get_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<CalculationSnapshot>, ZakathError>;
}
