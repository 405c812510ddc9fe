//! The calculation engine itself.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use zakath_shared::types::{CalculationId, CurrencyCode, MadhabId, UserId};

use crate::calendar;
use crate::currency::{CurrencyRegistry, RateService, round_presentation};

use super::error::ZakathError;
use super::traits::{CalculationStore, FinancialRecordReader};
use super::types::{
    BucketTotals, CalculationResult, CreateCalculationInput, MadhabRule, RuleType,
};

/// History queries return at most this many snapshots.
const HISTORY_LIMIT: u64 = 50;

/// Nisab threshold applied when a madhab has no active silver rule
/// (595 grams-of-silver equivalent, taken in the base currency unit).
fn fallback_nisab() -> Decimal {
    Decimal::from(595)
}

/// Zakath percentage applied when a madhab has no active rule.
fn default_percentage() -> Decimal {
    // 2.5
    Decimal::new(25, 1)
}

/// The zakath calculation engine.
///
/// Stateless between calls; every invocation is independent and may run
/// concurrently with others. There is no per-user calculation lock -
/// concurrent invocations for the same user each persist their own
/// snapshot, which is fine because history is append-only.
pub struct ZakathEngine {
    records: Arc<dyn FinancialRecordReader>,
    store: Arc<dyn CalculationStore>,
    registry: Arc<dyn CurrencyRegistry>,
    rates: RateService,
}

impl ZakathEngine {
    /// Creates an engine over the given collaborators.
    #[must_use]
    pub fn new(
        records: Arc<dyn FinancialRecordReader>,
        store: Arc<dyn CalculationStore>,
        registry: Arc<dyn CurrencyRegistry>,
        rates: RateService,
    ) -> Self {
        Self {
            records,
            store,
            registry,
            rates,
        }
    }

    /// Runs the full calculation pipeline for one user and persists a
    /// snapshot.
    ///
    /// An unknown `base_currency` silently falls back to USD; a user with
    /// no records yields a valid zero-valued snapshot. The only failure
    /// mode is collaborator unavailability.
    ///
    /// # Errors
    ///
    /// Returns [`ZakathError::Storage`] or [`ZakathError::Rate`] when a
    /// collaborator is unavailable.
    pub async fn calculate(
        &self,
        user: UserId,
        base_currency: &CurrencyCode,
        madhab: MadhabId,
    ) -> Result<CalculationResult, ZakathError> {
        self.calculate_at(user, base_currency, madhab, Utc::now()).await
    }

    /// [`Self::calculate`] with the conventional defaults: USD base
    /// currency and madhab 1.
    ///
    /// # Errors
    ///
    /// Returns an error only when a collaborator is unavailable.
    pub async fn calculate_with_defaults(
        &self,
        user: UserId,
    ) -> Result<CalculationResult, ZakathError> {
        self.calculate(user, &CurrencyCode::usd(), MadhabId::from_raw(1)).await
    }

    /// [`Self::calculate`] with a fixed evaluation instant.
    ///
    /// Used by tests and backfills; `calculate` passes the current time.
    pub async fn calculate_at(
        &self,
        user: UserId,
        base_currency: &CurrencyCode,
        madhab: MadhabId,
        now: DateTime<Utc>,
    ) -> Result<CalculationResult, ZakathError> {
        info!(%user, %base_currency, %madhab, "Starting zakath calculation");

        // Unrecognized codes never fail the calculation.
        let base = match self.registry.resolve(base_currency).await? {
            Some(entity) => entity.code,
            None => {
                warn!(%base_currency, "Unknown base currency, falling back to USD");
                CurrencyCode::usd()
            }
        };

        // Assets, bucketed.
        let mut buckets = BucketTotals::default();
        for asset in self.records.zakath_applicable_assets(user).await? {
            let value = self
                .convert_to_base(asset.current_value * asset.quantity, asset.currency.as_ref(), &base)
                .await?;
            let bucket = asset
                .category_tag
                .unwrap_or_else(|| super::category::classify_label(&asset.classification_label()));
            buckets.add(bucket, value);
        }

        // Hawl-window income joins the cash bucket.
        let hawl_start = now - Duration::days(calendar::LUNAR_YEAR_DAYS);
        for income in self.records.eligible_income_since(user, hawl_start).await? {
            let value = self
                .convert_to_base(income.amount, income.currency.as_ref(), &base)
                .await?;
            buckets.cash += value;
        }

        // Liabilities are the hawl-window expenses, summed without bucketing.
        let mut liabilities = Decimal::ZERO;
        for expense in self.records.expenses_since(user, hawl_start).await? {
            liabilities += self
                .convert_to_base(expense.amount, expense.currency.as_ref(), &base)
                .await?;
        }

        let total_assets = buckets.total();
        let net_worth = total_assets - liabilities;

        let nisab = self.resolve_nisab(madhab).await?;
        // Inclusive boundary: exactly at the threshold counts as due.
        let is_zakath_due = net_worth >= nisab;

        let percentage = self.resolve_percentage(madhab).await?;
        let zakath_amount = if is_zakath_due {
            round_presentation(net_worth * percentage / Decimal::ONE_HUNDRED, 2)
        } else {
            Decimal::ZERO
        };

        let input = CreateCalculationInput {
            user_id: user,
            calculated_at: now,
            hijri_label: calendar::to_hijri_label(now.date_naive()),
            total_assets,
            total_liabilities: liabilities,
            nisab_threshold: nisab,
            zakath_amount,
            zakath_percentage: percentage,
            buckets,
            base_currency: base.clone(),
            notes: Some(format!("Madhab ID: {madhab}")),
        };
        let snapshot = self.store.insert(input).await?;

        info!(%user, %zakath_amount, %base, "Zakath calculation complete");

        Ok(CalculationResult {
            snapshot,
            net_worth,
            is_zakath_due,
        })
    }

    /// The nisab threshold for a madhab.
    ///
    /// The `currency` argument is accepted for interface compatibility
    /// but the stored nisab value is used verbatim; no conversion is
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    pub async fn nisab_threshold(
        &self,
        currency: &CurrencyCode,
        madhab: MadhabId,
    ) -> Result<Decimal, ZakathError> {
        debug!(%currency, %madhab, "Nisab threshold lookup");
        self.resolve_nisab(madhab).await
    }

    /// Calculation history for a user, newest first, capped at 50.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    pub async fn history(&self, user: UserId) -> Result<Vec<CalculationResult>, ZakathError> {
        let snapshots = self.store.list_by_user(user, HISTORY_LIMIT).await?;
        Ok(snapshots.into_iter().map(CalculationResult::from_snapshot).collect())
    }

    /// A single past calculation by id.
    ///
    /// # Errors
    ///
    /// Returns an error only when storage is unavailable.
    pub async fn calculation(
        &self,
        id: CalculationId,
    ) -> Result<Option<CalculationResult>, ZakathError> {
        let snapshot = self.store.get_by_id(id).await?;
        Ok(snapshot.map(CalculationResult::from_snapshot))
    }

    async fn resolve_nisab(&self, madhab: MadhabId) -> Result<Decimal, ZakathError> {
        let rule = self.records.active_rule_of_type(madhab, RuleType::Silver).await?;
        Ok(rule.as_ref().map_or_else(fallback_nisab, |r| r.nisab_value))
    }

    async fn resolve_percentage(&self, madhab: MadhabId) -> Result<Decimal, ZakathError> {
        let rule: Option<MadhabRule> = self.records.active_rule(madhab).await?;
        Ok(rule.as_ref().map_or_else(default_percentage, |r| r.zakath_percentage))
    }

    /// Converts an amount into the base currency. Records without a
    /// currency are taken to be in the base currency already.
    async fn convert_to_base(
        &self,
        amount: Decimal,
        from: Option<&CurrencyCode>,
        base: &CurrencyCode,
    ) -> Result<Decimal, ZakathError> {
        match from {
            None => Ok(amount),
            Some(code) if code == base => Ok(amount),
            Some(code) => Ok(self.rates.convert(amount, code, base).await?),
        }
    }
}
