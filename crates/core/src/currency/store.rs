//! Rate store collaborator.

use async_trait::async_trait;
use zakath_shared::types::CurrencyCode;

use super::error::RateError;
use super::exchange::RateRecord;

/// Persistence for exchange rate records.
///
/// The store is shared and mutably written by concurrent lookups; writes
/// are append-only (new records keyed by pair and timestamp), so duplicate
/// writes from racing callers are harmless. Freshness, not identity,
/// governs correctness.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// The most recent active record for the exact (from, to) pair.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store is unavailable.
    async fn latest_active(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Option<RateRecord>, RateError>;

    /// Appends a new active rate record.
    ///
    /// # Errors
    ///
    /// Returns an error only when the store is unavailable.
    async fn insert(&self, record: RateRecord) -> Result<(), RateError>;
}
