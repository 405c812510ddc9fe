//! Currency registry collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use zakath_shared::types::{CurrencyCode, CurrencyId};

use super::error::RateError;

/// A currency known to the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyEntity {
    /// Unique identifier.
    pub id: CurrencyId,
    /// ISO 4217 code.
    pub code: CurrencyCode,
    /// Full name (e.g., "Saudi Riyal").
    pub name: String,
    /// Display symbol (e.g., "$").
    pub symbol: String,
    /// Number of decimal places used at presentation boundaries.
    pub decimal_places: u32,
    /// Whether the currency is selectable.
    pub is_active: bool,
}

/// Read access to the set of known currencies.
#[async_trait]
pub trait CurrencyRegistry: Send + Sync {
    /// Looks up a currency by code.
    ///
    /// # Errors
    ///
    /// Returns an error only when the registry itself is unavailable;
    /// an unknown code is `Ok(None)`.
    async fn resolve(&self, code: &CurrencyCode) -> Result<Option<CurrencyEntity>, RateError>;
}
