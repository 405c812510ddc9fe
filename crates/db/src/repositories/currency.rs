//! Currency registry backed by the currencies table.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use zakath_core::currency::{CurrencyEntity, CurrencyRegistry, RateError};
use zakath_shared::types::{CurrencyCode, CurrencyId};

use crate::entities::currencies;

/// Repository over the currencies master table.
#[derive(Debug, Clone)]
pub struct CurrencyRepository {
    db: DatabaseConnection,
}

impl CurrencyRepository {
    /// Creates a new currency repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all active currencies, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_active(&self) -> Result<Vec<CurrencyEntity>, RateError> {
        let models = currencies::Entity::find()
            .filter(currencies::Column::IsActive.eq(true))
            .order_by_asc(currencies::Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| RateError::Registry(e.to_string()))?;

        Ok(models.into_iter().filter_map(to_entity).collect())
    }
}

#[async_trait]
impl CurrencyRegistry for CurrencyRepository {
    async fn resolve(&self, code: &CurrencyCode) -> Result<Option<CurrencyEntity>, RateError> {
        let model = currencies::Entity::find()
            .filter(currencies::Column::Code.eq(code.as_str()))
            .filter(currencies::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| RateError::Registry(e.to_string()))?;

        Ok(model.and_then(to_entity))
    }
}

/// Rows with a malformed code never existed as far as the engine is
/// concerned.
fn to_entity(model: currencies::Model) -> Option<CurrencyEntity> {
    let code = CurrencyCode::parse(&model.code).ok()?;
    Some(CurrencyEntity {
        id: CurrencyId::from_raw(model.id),
        code,
        name: model.name,
        symbol: model.symbol,
        decimal_places: u32::try_from(model.decimal_places).unwrap_or(2),
        is_active: model.is_active,
    })
}
