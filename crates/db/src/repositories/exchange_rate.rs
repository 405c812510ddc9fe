//! Rate store backed by the exchange_rates table.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use zakath_core::currency::{RateError, RateRecord, RateSource, RateStore};
use zakath_shared::types::CurrencyCode;

use crate::entities::exchange_rates;

/// Repository over the cached exchange rate rows.
///
/// Rows are append-only; a recomputed rate for a pair is inserted as a
/// new row and `latest_active` picks the most recent one.
#[derive(Debug, Clone)]
pub struct ExchangeRateRepository {
    db: DatabaseConnection,
}

impl ExchangeRateRepository {
    /// Creates a new exchange rate repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RateStore for ExchangeRateRepository {
    async fn latest_active(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Option<RateRecord>, RateError> {
        let model = exchange_rates::Entity::find()
            .filter(exchange_rates::Column::FromCurrency.eq(from.as_str()))
            .filter(exchange_rates::Column::ToCurrency.eq(to.as_str()))
            .filter(exchange_rates::Column::IsActive.eq(true))
            .order_by_desc(exchange_rates::Column::EffectiveAt)
            .one(&self.db)
            .await
            .map_err(|e| RateError::Store(e.to_string()))?;

        Ok(model.and_then(to_record))
    }

    async fn insert(&self, record: RateRecord) -> Result<(), RateError> {
        let row = exchange_rates::ActiveModel {
            id: NotSet,
            from_currency: Set(record.from_currency.to_string()),
            to_currency: Set(record.to_currency.to_string()),
            rate: Set(record.rate),
            effective_at: Set(record.effective_at.into()),
            source: Set(record.source.as_str().to_string()),
            is_active: Set(record.is_active),
        };
        row.insert(&self.db)
            .await
            .map_err(|e| RateError::Store(e.to_string()))?;
        Ok(())
    }
}

fn to_record(model: exchange_rates::Model) -> Option<RateRecord> {
    let from_currency = CurrencyCode::parse(&model.from_currency).ok()?;
    let to_currency = CurrencyCode::parse(&model.to_currency).ok()?;
    Some(RateRecord {
        from_currency,
        to_currency,
        rate: model.rate,
        effective_at: model.effective_at.with_timezone(&Utc),
        source: RateSource::from_str_lossy(&model.source),
        is_active: model.is_active,
    })
}
