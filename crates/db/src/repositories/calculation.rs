//! Calculation snapshot store backed by the zakath_calculations table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use zakath_core::zakath::{
    BucketTotals, CalculationSnapshot, CalculationStore, CreateCalculationInput, ZakathError,
};
use zakath_shared::types::{CalculationId, CurrencyCode, UserId};

use crate::entities::zakath_calculations;

/// Repository over the append-only calculation snapshots.
#[derive(Debug, Clone)]
pub struct CalculationRepository {
    db: DatabaseConnection,
}

impl CalculationRepository {
    /// Creates a new calculation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalculationStore for CalculationRepository {
    async fn insert(
        &self,
        input: CreateCalculationInput,
    ) -> Result<CalculationSnapshot, ZakathError> {
        let row = zakath_calculations::ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id.into_inner()),
            calculated_at: Set(input.calculated_at.into()),
            hijri_label: Set(input.hijri_label),
            total_assets: Set(input.total_assets),
            total_liabilities: Set(input.total_liabilities),
            nisab_threshold: Set(input.nisab_threshold),
            zakath_amount: Set(input.zakath_amount),
            zakath_percentage: Set(input.zakath_percentage),
            cash_total: Set(input.buckets.cash),
            gold_total: Set(input.buckets.gold),
            silver_total: Set(input.buckets.silver),
            investments_total: Set(input.buckets.investments),
            other_total: Set(input.buckets.other),
            base_currency: Set(input.base_currency.to_string()),
            notes: Set(input.notes),
        };
        let model = row.insert(&self.db).await.map_err(storage)?;
        Ok(snapshot_from_model(model))
    }

    async fn list_by_user(
        &self,
        user: UserId,
        limit: u64,
    ) -> Result<Vec<CalculationSnapshot>, ZakathError> {
        let models = zakath_calculations::Entity::find()
            .filter(zakath_calculations::Column::UserId.eq(user.into_inner()))
            .order_by_desc(zakath_calculations::Column::CalculatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(storage)?;

        Ok(models.into_iter().map(snapshot_from_model).collect())
    }

    async fn get_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<CalculationSnapshot>, ZakathError> {
        let model = zakath_calculations::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage)?;

        Ok(model.map(snapshot_from_model))
    }
}

fn storage(err: DbErr) -> ZakathError {
    ZakathError::Storage(err.to_string())
}

fn snapshot_from_model(model: zakath_calculations::Model) -> CalculationSnapshot {
    let base_currency =
        CurrencyCode::parse(&model.base_currency).unwrap_or_else(|_| CurrencyCode::usd());
    CalculationSnapshot {
        id: CalculationId::from_raw(model.id),
        user_id: UserId::from_raw(model.user_id),
        calculated_at: model.calculated_at.with_timezone(&Utc),
        hijri_label: model.hijri_label,
        total_assets: model.total_assets,
        total_liabilities: model.total_liabilities,
        nisab_threshold: model.nisab_threshold,
        zakath_amount: model.zakath_amount,
        zakath_percentage: model.zakath_percentage,
        buckets: BucketTotals {
            cash: model.cash_total,
            gold: model.gold_total,
            silver: model.silver_total,
            investments: model.investments_total,
            other: model.other_total,
        },
        base_currency,
        notes: model.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_from_model_rebuilds_buckets() {
        let model = zakath_calculations::Model {
            id: 5,
            user_id: 2,
            calculated_at: Utc::now().into(),
            hijri_label: Some("9 Ramadan 1445".to_string()),
            total_assets: dec!(10500),
            total_liabilities: dec!(200),
            nisab_threshold: dec!(595),
            zakath_amount: dec!(257.50),
            zakath_percentage: dec!(2.5),
            cash_total: dec!(500),
            gold_total: dec!(10000),
            silver_total: dec!(0),
            investments_total: dec!(0),
            other_total: dec!(0),
            base_currency: "USD".to_string(),
            notes: None,
        };

        let snapshot = snapshot_from_model(model);
        assert_eq!(snapshot.buckets.gold, dec!(10000));
        assert_eq!(snapshot.buckets.cash, dec!(500));
        assert_eq!(snapshot.base_currency.as_str(), "USD");
    }

    #[test]
    fn test_snapshot_from_model_bad_currency_defaults_to_usd() {
        let model = zakath_calculations::Model {
            id: 6,
            user_id: 2,
            calculated_at: Utc::now().into(),
            hijri_label: None,
            total_assets: dec!(0),
            total_liabilities: dec!(0),
            nisab_threshold: dec!(595),
            zakath_amount: dec!(0),
            zakath_percentage: dec!(2.5),
            cash_total: dec!(0),
            gold_total: dec!(0),
            silver_total: dec!(0),
            investments_total: dec!(0),
            other_total: dec!(0),
            base_currency: "???".to_string(),
            notes: None,
        };

        let snapshot = snapshot_from_model(model);
        assert_eq!(snapshot.base_currency, CurrencyCode::usd());
    }
}
