//! Financial record repository: assets, income, and expenses.
//!
//! Write paths stamp each record with its Hijri date label at entry
//! time, so the label survives later changes to the conversion logic.
//! Deleting a record never touches past calculation snapshots.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use zakath_core::calendar;
use zakath_core::zakath::{
    AssetBucket, AssetRecord, ExpenseRecord, FinancialRecordReader, IncomeRecord, MadhabRule,
    RuleType, ZakathError,
};
use zakath_shared::types::{AssetId, CurrencyCode, ExpenseId, IncomeId, MadhabId, UserId};

use crate::entities::{current_assets, expense_details, income_details, madhab_rules};

/// Input for creating an asset record.
#[derive(Debug, Clone)]
pub struct CreateAssetInput {
    /// Owning user.
    pub user_id: UserId,
    /// Free-text item name.
    pub item_name: String,
    /// Category master name.
    pub category_name: String,
    /// Explicit bucket tag; `None` leaves classification to the engine's
    /// label fallback.
    pub category_tag: Option<AssetBucket>,
    /// Current value of one unit.
    pub current_value: Decimal,
    /// Quantity multiplier.
    pub quantity: Decimal,
    /// Denomination; `None` means the calculation's base currency.
    pub currency: Option<CurrencyCode>,
    /// Acquisition date.
    pub acquired_at: DateTime<Utc>,
    /// Whether the asset counts toward zakath.
    pub is_zakath_applicable: bool,
}

/// Input for creating an income record.
#[derive(Debug, Clone)]
pub struct CreateIncomeInput {
    /// Owning user.
    pub user_id: UserId,
    /// Amount received.
    pub amount: Decimal,
    /// Denomination; `None` means the calculation's base currency.
    pub currency: Option<CurrencyCode>,
    /// When the income was received.
    pub received_at: DateTime<Utc>,
    /// Who paid it.
    pub source_name: Option<String>,
    /// Whether the income counts toward zakath.
    pub is_zakath_eligible: bool,
}

/// Input for creating an expense record.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Owning user.
    pub user_id: UserId,
    /// Amount spent.
    pub amount: Decimal,
    /// Denomination; `None` means the calculation's base currency.
    pub currency: Option<CurrencyCode>,
    /// Transaction date.
    pub transacted_at: DateTime<Utc>,
}

/// Repository over the financial record tables and madhab rules.
#[derive(Debug, Clone)]
pub struct FinancialRecordRepository {
    db: DatabaseConnection,
}

impl FinancialRecordRepository {
    /// Creates a new financial record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an asset, stamping its Hijri acquisition label.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_asset(&self, input: CreateAssetInput) -> Result<AssetRecord, ZakathError> {
        let hijri = calendar::to_hijri_label(input.acquired_at.date_naive());
        let row = current_assets::ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id.into_inner()),
            item_name: Set(input.item_name),
            category_name: Set(input.category_name),
            category_tag: Set(input.category_tag.map(|t| t.as_str().to_string())),
            current_value: Set(input.current_value),
            quantity: Set(input.quantity),
            currency_code: Set(input.currency.map(|c| c.to_string())),
            acquired_at: Set(input.acquired_at.into()),
            hijri_acquired: Set(hijri),
            is_zakath_applicable: Set(input.is_zakath_applicable),
        };
        let model = row.insert(&self.db).await.map_err(storage)?;
        debug!(asset_id = model.id, user_id = model.user_id, "Asset recorded");
        Ok(asset_from_model(model))
    }

    /// Inserts an income record, stamping its Hijri received label.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_income(
        &self,
        input: CreateIncomeInput,
    ) -> Result<IncomeRecord, ZakathError> {
        let hijri = calendar::to_hijri_label(input.received_at.date_naive());
        let row = income_details::ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id.into_inner()),
            amount: Set(input.amount),
            currency_code: Set(input.currency.map(|c| c.to_string())),
            received_at: Set(input.received_at.into()),
            hijri_received: Set(hijri),
            source_name: Set(input.source_name),
            is_zakath_eligible: Set(input.is_zakath_eligible),
        };
        let model = row.insert(&self.db).await.map_err(storage)?;
        debug!(income_id = model.id, user_id = model.user_id, "Income recorded");
        Ok(income_from_model(model))
    }

    /// Inserts an expense record, stamping its Hijri transaction label.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_expense(
        &self,
        input: CreateExpenseInput,
    ) -> Result<ExpenseRecord, ZakathError> {
        let hijri = calendar::to_hijri_label(input.transacted_at.date_naive());
        let row = expense_details::ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id.into_inner()),
            amount: Set(input.amount),
            currency_code: Set(input.currency.map(|c| c.to_string())),
            transacted_at: Set(input.transacted_at.into()),
            hijri_transacted: Set(hijri),
        };
        let model = row.insert(&self.db).await.map_err(storage)?;
        debug!(expense_id = model.id, user_id = model.user_id, "Expense recorded");
        Ok(expense_from_model(model))
    }

    /// Deletes an asset. Past snapshots are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_asset(&self, id: AssetId) -> Result<bool, ZakathError> {
        let result = current_assets::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes an income record. Past snapshots are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_income(&self, id: IncomeId) -> Result<bool, ZakathError> {
        let result = income_details::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected > 0)
    }

    /// Deletes an expense record. Past snapshots are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<bool, ZakathError> {
        let result = expense_details::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl FinancialRecordReader for FinancialRecordRepository {
    async fn zakath_applicable_assets(
        &self,
        user: UserId,
    ) -> Result<Vec<AssetRecord>, ZakathError> {
        let models = current_assets::Entity::find()
            .filter(current_assets::Column::UserId.eq(user.into_inner()))
            .filter(current_assets::Column::IsZakathApplicable.eq(true))
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(asset_from_model).collect())
    }

    async fn eligible_income_since(
        &self,
        user: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<IncomeRecord>, ZakathError> {
        let models = income_details::Entity::find()
            .filter(income_details::Column::UserId.eq(user.into_inner()))
            .filter(income_details::Column::IsZakathEligible.eq(true))
            .filter(income_details::Column::ReceivedAt.gte(since))
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(income_from_model).collect())
    }

    async fn expenses_since(
        &self,
        user: UserId,
        since: DateTime<Utc>,
    ) -> Result<Vec<ExpenseRecord>, ZakathError> {
        let models = expense_details::Entity::find()
            .filter(expense_details::Column::UserId.eq(user.into_inner()))
            .filter(expense_details::Column::TransactedAt.gte(since))
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(expense_from_model).collect())
    }

    async fn active_rule_of_type(
        &self,
        madhab: MadhabId,
        rule_type: RuleType,
    ) -> Result<Option<MadhabRule>, ZakathError> {
        let model = madhab_rules::Entity::find()
            .filter(madhab_rules::Column::MadhabId.eq(madhab.into_inner()))
            .filter(madhab_rules::Column::RuleType.eq(rule_type.as_str()))
            .filter(madhab_rules::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.and_then(rule_from_model))
    }

    async fn active_rule(&self, madhab: MadhabId) -> Result<Option<MadhabRule>, ZakathError> {
        let model = madhab_rules::Entity::find()
            .filter(madhab_rules::Column::MadhabId.eq(madhab.into_inner()))
            .filter(madhab_rules::Column::IsActive.eq(true))
            .order_by_asc(madhab_rules::Column::Id)
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.and_then(rule_from_model))
    }
}

fn storage(err: DbErr) -> ZakathError {
    ZakathError::Storage(err.to_string())
}

/// Malformed stored codes rehydrate as `None`, i.e. "base currency".
fn parse_currency(code: Option<&str>) -> Option<CurrencyCode> {
    code.and_then(|c| CurrencyCode::parse(c).ok())
}

fn asset_from_model(model: current_assets::Model) -> AssetRecord {
    AssetRecord {
        id: AssetId::from_raw(model.id),
        user_id: UserId::from_raw(model.user_id),
        item_name: model.item_name,
        category_name: model.category_name,
        category_tag: model.category_tag.as_deref().and_then(AssetBucket::from_str_opt),
        current_value: model.current_value,
        quantity: model.quantity,
        currency: parse_currency(model.currency_code.as_deref()),
        acquired_at: model.acquired_at.with_timezone(&Utc),
        hijri_acquired: model.hijri_acquired,
        is_zakath_applicable: model.is_zakath_applicable,
    }
}

fn income_from_model(model: income_details::Model) -> IncomeRecord {
    IncomeRecord {
        id: IncomeId::from_raw(model.id),
        user_id: UserId::from_raw(model.user_id),
        amount: model.amount,
        currency: parse_currency(model.currency_code.as_deref()),
        received_at: model.received_at.with_timezone(&Utc),
        hijri_received: model.hijri_received,
        source_name: model.source_name,
        is_zakath_eligible: model.is_zakath_eligible,
    }
}

fn expense_from_model(model: expense_details::Model) -> ExpenseRecord {
    ExpenseRecord {
        id: ExpenseId::from_raw(model.id),
        user_id: UserId::from_raw(model.user_id),
        amount: model.amount,
        currency: parse_currency(model.currency_code.as_deref()),
        transacted_at: model.transacted_at.with_timezone(&Utc),
        hijri_transacted: model.hijri_transacted,
    }
}

/// Rows with an unrecognized rule type are ignored rather than guessed at.
fn rule_from_model(model: madhab_rules::Model) -> Option<MadhabRule> {
    Some(MadhabRule {
        madhab: MadhabId::from_raw(model.madhab_id),
        rule_type: RuleType::from_str_opt(&model.rule_type)?,
        nisab_value: model.nisab_value,
        zakath_percentage: model.zakath_percentage,
        hawl_period_days: model.hawl_period_days,
        is_active: model.is_active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rule_from_model_skips_unknown_rule_type() {
        let model = madhab_rules::Model {
            id: 1,
            madhab_id: 1,
            rule_type: "Livestock".to_string(),
            nisab_value: dec!(40),
            zakath_percentage: dec!(2.5),
            hawl_period_days: 354,
            is_active: true,
        };
        assert!(rule_from_model(model).is_none());
    }

    #[test]
    fn test_asset_from_model_maps_tag_and_currency() {
        let model = current_assets::Model {
            id: 7,
            user_id: 3,
            item_name: "Necklace".to_string(),
            category_name: "Jewelry".to_string(),
            category_tag: Some("gold".to_string()),
            current_value: dec!(1200),
            quantity: dec!(2),
            currency_code: Some("SAR".to_string()),
            acquired_at: Utc::now().into(),
            hijri_acquired: Some("1 Muharram 1446".to_string()),
            is_zakath_applicable: true,
        };

        let record = asset_from_model(model);
        assert_eq!(record.category_tag, Some(AssetBucket::Gold));
        assert_eq!(record.currency.as_ref().map(|c| c.as_str()), Some("SAR"));
    }

    #[test]
    fn test_malformed_stored_currency_rehydrates_as_base() {
        assert!(parse_currency(Some("US")).is_none());
        assert!(parse_currency(Some("12A")).is_none());
        assert!(parse_currency(None).is_none());
        assert!(parse_currency(Some("eur")).is_some());
    }
}
