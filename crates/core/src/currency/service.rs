//! Exchange rate resolution with cache-or-compute semantics.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use zakath_shared::types::CurrencyCode;

use super::conversion::convert_amount;
use super::error::RateError;
use super::exchange::{RateRecord, RateSource};
use super::registry::CurrencyRegistry;
use super::store::RateStore;
use super::table::RateTable;

/// Resolves conversion rates between currency codes.
///
/// Lookup policy for a (from, to) pair:
/// 1. identity pairs return 1 without touching the store;
/// 2. a cached rate at most `freshness` old is returned verbatim, even if
///    the static table has since changed;
/// 3. otherwise a cross-rate through USD is computed from the static
///    table and written back to the store;
/// 4. a currency absent from the table degrades to an identity rate with
///    a warning - a calculation is never failed over a missing rate.
///
/// Concurrent lookups for the same pair may both recompute and both
/// write; the duplicate append is harmless.
#[derive(Clone)]
pub struct RateService {
    store: Arc<dyn RateStore>,
    registry: Arc<dyn CurrencyRegistry>,
    table: Arc<RateTable>,
    freshness: Duration,
}

impl RateService {
    /// Creates a rate service over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn RateStore>,
        registry: Arc<dyn CurrencyRegistry>,
        table: Arc<RateTable>,
        freshness_days: i64,
    ) -> Self {
        Self {
            store,
            registry,
            table,
            freshness: Duration::days(freshness_days),
        }
    }

    /// The multiplicative rate from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the rate store or currency registry is
    /// unavailable.
    pub async fn get_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, RateError> {
        self.rate_at(from, to, Utc::now()).await
    }

    /// Converts an amount from one currency to another.
    ///
    /// No rounding is applied; callers round at presentation boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error only when a collaborator is unavailable.
    pub async fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, RateError> {
        let rate = self.get_rate(from, to).await?;
        Ok(convert_amount(amount, rate))
    }

    /// Primes or refreshes the cache for every ordered non-self pair of
    /// the static table. Returns the number of pairs processed.
    ///
    /// This is the batch/background-job entry point.
    ///
    /// # Errors
    ///
    /// Returns an error only when a collaborator is unavailable.
    pub async fn refresh_all_rates(&self) -> Result<usize, RateError> {
        let codes: Vec<CurrencyCode> = self.table.currencies().cloned().collect();
        let mut count = 0;
        for from in &codes {
            for to in &codes {
                if from != to {
                    self.get_rate(from, to).await?;
                    count += 1;
                }
            }
        }
        debug!(count, "Refreshed exchange rate cache");
        Ok(count)
    }

    async fn rate_at(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        now: DateTime<Utc>,
    ) -> Result<Decimal, RateError> {
        if from == to {
            return Ok(Decimal::ONE);
        }

        if let Some(cached) = self.store.latest_active(from, to).await? {
            if cached.is_fresh(now, self.freshness) {
                return Ok(cached.rate);
            }
        }

        if let Some(rate) = self.table.cross_rate(from, to) {
            // Persist for future cache hits. Only pairs the registry knows
            // about are written; the computed rate is returned either way.
            let from_known = self.registry.resolve(from).await?.is_some();
            let to_known = self.registry.resolve(to).await?.is_some();
            if from_known && to_known {
                self.store
                    .insert(RateRecord {
                        from_currency: from.clone(),
                        to_currency: to.clone(),
                        rate,
                        effective_at: now,
                        source: RateSource::System,
                        is_active: true,
                    })
                    .await?;
            }
            return Ok(rate);
        }

        warn!(%from, %to, "No exchange rate available, falling back to 1.0");
        Ok(Decimal::ONE)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::currency::registry::CurrencyEntity;
    use zakath_shared::types::CurrencyId;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    /// In-memory rate store that counts reads.
    #[derive(Default)]
    struct MemoryRateStore {
        rows: Mutex<Vec<RateRecord>>,
        reads: AtomicUsize,
    }

    impl MemoryRateStore {
        fn with_rows(rows: Vec<RateRecord>) -> Self {
            Self {
                rows: Mutex::new(rows),
                reads: AtomicUsize::new(0),
            }
        }

        fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RateStore for MemoryRateStore {
        async fn latest_active(
            &self,
            from: &CurrencyCode,
            to: &CurrencyCode,
        ) -> Result<Option<RateRecord>, RateError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .filter(|r| r.is_active && &r.from_currency == from && &r.to_currency == to)
                .max_by_key(|r| r.effective_at)
                .cloned())
        }

        async fn insert(&self, record: RateRecord) -> Result<(), RateError> {
            self.rows.lock().unwrap().push(record);
            Ok(())
        }
    }

    /// Registry that knows a fixed set of codes.
    struct FixedRegistry(Vec<CurrencyCode>);

    #[async_trait]
    impl CurrencyRegistry for FixedRegistry {
        async fn resolve(&self, code: &CurrencyCode) -> Result<Option<CurrencyEntity>, RateError> {
            Ok(self.0.iter().position(|c| c == code).map(|i| CurrencyEntity {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                id: CurrencyId::from_raw(i as i32 + 1),
                code: code.clone(),
                name: code.to_string(),
                symbol: "$".to_string(),
                decimal_places: 2,
                is_active: true,
            }))
        }
    }

    fn service_with(store: Arc<MemoryRateStore>) -> RateService {
        let table = Arc::new(RateTable::builtin());
        let registry = Arc::new(FixedRegistry(table.currencies().cloned().collect()));
        RateService::new(store, registry, table, 7)
    }

    fn record(from: &str, to: &str, rate: Decimal, effective_at: DateTime<Utc>) -> RateRecord {
        RateRecord {
            from_currency: code(from),
            to_currency: code(to),
            rate,
            effective_at,
            source: RateSource::Manual,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_identity_rate_skips_store() {
        let store = Arc::new(MemoryRateStore::default());
        let service = service_with(Arc::clone(&store));

        let rate = service.get_rate(&code("EUR"), &code("EUR")).await.unwrap();

        assert_eq!(rate, Decimal::ONE);
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fresh_cached_rate_returned_verbatim() {
        let now = Utc::now();
        // A cached value that disagrees with the static table on purpose.
        let store = Arc::new(MemoryRateStore::with_rows(vec![record(
            "EUR",
            "USD",
            dec!(1.0870),
            now - Duration::days(3),
        )]));
        let service = service_with(Arc::clone(&store));

        let rate = service.rate_at(&code("EUR"), &code("USD"), now).await.unwrap();

        assert_eq!(rate, dec!(1.0870));
        assert_eq!(store.row_count(), 1, "no recompute write");
    }

    #[tokio::test]
    async fn test_cached_rate_exactly_seven_days_old_still_honored() {
        let now = Utc::now();
        let store = Arc::new(MemoryRateStore::with_rows(vec![record(
            "EUR",
            "USD",
            dec!(1.2345),
            now - Duration::days(7),
        )]));
        let service = service_with(Arc::clone(&store));

        let rate = service.rate_at(&code("EUR"), &code("USD"), now).await.unwrap();

        assert_eq!(rate, dec!(1.2345));
    }

    #[tokio::test]
    async fn test_stale_cached_rate_triggers_recompute_and_write() {
        let now = Utc::now();
        let store = Arc::new(MemoryRateStore::with_rows(vec![record(
            "EUR",
            "USD",
            dec!(9.99),
            now - Duration::days(7) - Duration::minutes(15),
        )]));
        let service = service_with(Arc::clone(&store));

        let rate = service.rate_at(&code("EUR"), &code("USD"), now).await.unwrap();

        // Static table: 1.0 / 0.92
        assert_eq!(rate, dec!(1.0) / dec!(0.92));
        assert_eq!(store.row_count(), 2, "recomputed rate cached");
    }

    #[tokio::test]
    async fn test_most_recent_active_record_wins() {
        let now = Utc::now();
        let store = Arc::new(MemoryRateStore::with_rows(vec![
            record("EUR", "USD", dec!(1.05), now - Duration::days(6)),
            record("EUR", "USD", dec!(1.10), now - Duration::days(1)),
        ]));
        let service = service_with(Arc::clone(&store));

        let rate = service.rate_at(&code("EUR"), &code("USD"), now).await.unwrap();

        assert_eq!(rate, dec!(1.10));
    }

    #[tokio::test]
    async fn test_unknown_currency_falls_back_to_identity() {
        let store = Arc::new(MemoryRateStore::default());
        let service = service_with(Arc::clone(&store));

        let rate = service.get_rate(&code("JPY"), &code("USD")).await.unwrap();

        assert_eq!(rate, Decimal::ONE);
        assert_eq!(store.row_count(), 0, "identity fallback is never cached");
    }

    #[tokio::test]
    async fn test_cross_rate_not_cached_for_unregistered_currency() {
        let now = Utc::now();
        let store = Arc::new(MemoryRateStore::default());
        let table = Arc::new(RateTable::builtin());
        // Registry knows USD only; SAR resolves in the table but not here.
        let registry = Arc::new(FixedRegistry(vec![code("USD")]));
        let service = RateService::new(Arc::clone(&store) as Arc<dyn RateStore>, registry, table, 7);

        let rate = service.rate_at(&code("USD"), &code("SAR"), now).await.unwrap();

        assert_eq!(rate, dec!(3.75));
        assert_eq!(store.row_count(), 0, "write skipped without registry entries");
    }

    #[tokio::test]
    async fn test_convert_multiplies_without_rounding() {
        let now = Utc::now();
        let store = Arc::new(MemoryRateStore::with_rows(vec![record(
            "EUR",
            "USD",
            dec!(1.0870),
            now,
        )]));
        let service = service_with(store);

        let amount = service.convert(dec!(1000), &code("EUR"), &code("USD")).await.unwrap();

        assert_eq!(amount, dec!(1087.0000));
    }

    #[tokio::test]
    async fn test_refresh_all_rates_counts_ordered_pairs() {
        let store = Arc::new(MemoryRateStore::default());
        let service = service_with(Arc::clone(&store));

        let count = service.refresh_all_rates().await.unwrap();

        // 12 currencies -> 12 * 11 ordered pairs.
        assert_eq!(count, 132);
        assert_eq!(store.row_count(), 132, "every pair primed into the cache");
    }
}
