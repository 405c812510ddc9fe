//! Domain types for the zakath calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use zakath_shared::types::{
    AssetId, CalculationId, CurrencyCode, ExpenseId, IncomeId, MadhabId, UserId,
};

use super::category::AssetBucket;

/// An asset as seen by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Unique identifier.
    pub id: AssetId,
    /// Owning user.
    pub user_id: UserId,
    /// Free-text item name (e.g., "Gold necklace").
    pub item_name: String,
    /// Category master name (e.g., "Precious Metals").
    pub category_name: String,
    /// Explicit bucket tag decided at data entry. Untagged legacy records
    /// fall back to substring classification over the names.
    pub category_tag: Option<AssetBucket>,
    /// Current value of one unit.
    pub current_value: Decimal,
    /// Quantity multiplier; contribution = `current_value * quantity`.
    pub quantity: Decimal,
    /// Denomination; `None` means "already in the base currency".
    pub currency: Option<CurrencyCode>,
    /// Acquisition date.
    pub acquired_at: DateTime<Utc>,
    /// Hijri label of the acquisition date, stamped at entry.
    pub hijri_acquired: Option<String>,
    /// Whether the asset counts toward zakath at all.
    pub is_zakath_applicable: bool,
}

impl AssetRecord {
    /// The label used for fallback bucket classification.
    #[must_use]
    pub fn classification_label(&self) -> String {
        format!("{} {}", self.category_name, self.item_name)
    }
}

/// An income record as seen by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    /// Unique identifier.
    pub id: IncomeId,
    /// Owning user.
    pub user_id: UserId,
    /// Amount received.
    pub amount: Decimal,
    /// Denomination; `None` means "already in the base currency".
    pub currency: Option<CurrencyCode>,
    /// When the income was received.
    pub received_at: DateTime<Utc>,
    /// Hijri label of the received date, stamped at entry.
    pub hijri_received: Option<String>,
    /// Who paid it (free text).
    pub source_name: Option<String>,
    /// Whether the income counts toward zakath.
    pub is_zakath_eligible: bool,
}

/// An expense record as seen by the engine.
///
/// Expenses carry no zakath-eligibility flag; every expense inside the
/// hawl window counts as a liability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Amount spent.
    pub amount: Decimal,
    /// Denomination; `None` means "already in the base currency".
    pub currency: Option<CurrencyCode>,
    /// Transaction date.
    pub transacted_at: DateTime<Utc>,
    /// Hijri label of the transaction date, stamped at entry.
    pub hijri_transacted: Option<String>,
}

/// The kind of wealth a madhab rule governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Gold-denominated nisab rule.
    Gold,
    /// Silver-denominated nisab rule - the one consulted for thresholds.
    Silver,
}

impl RuleType {
    /// Storage representation of the rule type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
        }
    }

    /// Parses the storage representation.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Gold" => Some(Self::Gold),
            "Silver" => Some(Self::Silver),
            _ => None,
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A madhab's zakath rule.
///
/// `hawl_period_days` is stored with the rule but the engine's windowing
/// uses the fixed 354-day lunar year from `calendar::LUNAR_YEAR_DAYS`;
/// the field is carried, never consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MadhabRule {
    /// The madhab this rule belongs to.
    pub madhab: MadhabId,
    /// The kind of wealth the rule governs.
    pub rule_type: RuleType,
    /// Nisab threshold, taken verbatim in the calculation's base currency.
    pub nisab_value: Decimal,
    /// Zakath percentage (e.g., 2.5).
    pub zakath_percentage: Decimal,
    /// Hawl period in days (stored, not consulted).
    pub hawl_period_days: i32,
    /// Whether the rule is in force.
    pub is_active: bool,
}

/// Per-bucket sub-totals, all in the calculation's base currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketTotals {
    /// Cash, bank balances, savings, plus hawl-window income.
    pub cash: Decimal,
    /// Gold holdings.
    pub gold: Decimal,
    /// Silver holdings.
    pub silver: Decimal,
    /// Stocks, bonds, investment funds.
    pub investments: Decimal,
    /// Everything else.
    pub other: Decimal,
}

impl BucketTotals {
    /// Adds an amount to the given bucket.
    pub fn add(&mut self, bucket: AssetBucket, amount: Decimal) {
        match bucket {
            AssetBucket::Cash => self.cash += amount,
            AssetBucket::Gold => self.gold += amount,
            AssetBucket::Silver => self.silver += amount,
            AssetBucket::Investments => self.investments += amount,
            AssetBucket::Other => self.other += amount,
        }
    }

    /// Sum of all five buckets.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cash + self.gold + self.silver + self.investments + self.other
    }
}

/// Input for persisting a calculation snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCalculationInput {
    /// User the calculation belongs to.
    pub user_id: UserId,
    /// When the calculation ran.
    pub calculated_at: DateTime<Utc>,
    /// Hijri label for the calculation instant; `None` when conversion
    /// was unavailable.
    pub hijri_label: Option<String>,
    /// Sum of all asset buckets.
    pub total_assets: Decimal,
    /// Hawl-window expenses.
    pub total_liabilities: Decimal,
    /// Nisab threshold used.
    pub nisab_threshold: Decimal,
    /// Zakath owed; zero when not due.
    pub zakath_amount: Decimal,
    /// Percentage applied.
    pub zakath_percentage: Decimal,
    /// Per-bucket breakdown.
    pub buckets: BucketTotals,
    /// Base currency every amount is denominated in.
    pub base_currency: CurrencyCode,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A persisted, immutable calculation snapshot.
///
/// History is append-only: snapshots are never updated or deleted by the
/// normal flow, and deleting a financial record never retroactively
/// alters past snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationSnapshot {
    /// Unique identifier.
    pub id: CalculationId,
    /// User the calculation belongs to.
    pub user_id: UserId,
    /// When the calculation ran.
    pub calculated_at: DateTime<Utc>,
    /// Hijri label for the calculation instant.
    pub hijri_label: Option<String>,
    /// Sum of all asset buckets.
    pub total_assets: Decimal,
    /// Hawl-window expenses.
    pub total_liabilities: Decimal,
    /// Nisab threshold used.
    pub nisab_threshold: Decimal,
    /// Zakath owed; zero when not due.
    pub zakath_amount: Decimal,
    /// Percentage applied.
    pub zakath_percentage: Decimal,
    /// Per-bucket breakdown.
    pub buckets: BucketTotals,
    /// Base currency every amount is denominated in.
    pub base_currency: CurrencyCode,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// A snapshot augmented with derived values for callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The persisted snapshot.
    pub snapshot: CalculationSnapshot,
    /// `total_assets - total_liabilities` (derived, not stored).
    pub net_worth: Decimal,
    /// Whether zakath is due.
    pub is_zakath_due: bool,
}

impl CalculationResult {
    /// Rehydrates a result from a stored snapshot.
    ///
    /// Stored rows derive `is_zakath_due` from `zakath_amount > 0`; a
    /// snapshot whose net worth sat exactly on the threshold but owed a
    /// rounded-to-zero amount reads back as not due.
    #[must_use]
    pub fn from_snapshot(snapshot: CalculationSnapshot) -> Self {
        let net_worth = snapshot.total_assets - snapshot.total_liabilities;
        let is_zakath_due = snapshot.zakath_amount > Decimal::ZERO;
        Self {
            snapshot,
            net_worth,
            is_zakath_due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bucket_totals_add_and_total() {
        let mut totals = BucketTotals::default();
        totals.add(AssetBucket::Gold, dec!(10000));
        totals.add(AssetBucket::Cash, dec!(500));
        totals.add(AssetBucket::Cash, dec!(250));

        assert_eq!(totals.gold, dec!(10000));
        assert_eq!(totals.cash, dec!(750));
        assert_eq!(totals.total(), dec!(10750));
    }

    #[test]
    fn test_classification_label_concatenates_names() {
        let asset = AssetRecord {
            id: AssetId::from_raw(1),
            user_id: UserId::from_raw(1),
            item_name: "Investment Account".to_string(),
            category_name: "Gold".to_string(),
            category_tag: None,
            current_value: dec!(1),
            quantity: dec!(1),
            currency: None,
            acquired_at: Utc::now(),
            hijri_acquired: None,
            is_zakath_applicable: true,
        };
        assert_eq!(asset.classification_label(), "Gold Investment Account");
    }

    #[test]
    fn test_result_from_snapshot_derives_fields() {
        let snapshot = CalculationSnapshot {
            id: CalculationId::from_raw(1),
            user_id: UserId::from_raw(1),
            calculated_at: Utc::now(),
            hijri_label: None,
            total_assets: dec!(10500),
            total_liabilities: dec!(200),
            nisab_threshold: dec!(595),
            zakath_amount: dec!(257.50),
            zakath_percentage: dec!(2.5),
            buckets: BucketTotals::default(),
            base_currency: CurrencyCode::usd(),
            notes: None,
        };

        let result = CalculationResult::from_snapshot(snapshot);
        assert_eq!(result.net_worth, dec!(10300));
        assert!(result.is_zakath_due);
    }

    #[test]
    fn test_result_from_snapshot_zero_amount_not_due() {
        let snapshot = CalculationSnapshot {
            id: CalculationId::from_raw(2),
            user_id: UserId::from_raw(1),
            calculated_at: Utc::now(),
            hijri_label: None,
            total_assets: dec!(100),
            total_liabilities: dec!(50),
            nisab_threshold: dec!(595),
            zakath_amount: Decimal::ZERO,
            zakath_percentage: dec!(2.5),
            buckets: BucketTotals::default(),
            base_currency: CurrencyCode::usd(),
            notes: None,
        };

        let result = CalculationResult::from_snapshot(snapshot);
        assert!(!result.is_zakath_due);
        assert_eq!(result.net_worth, dec!(50));
    }
}
