//! Static fallback rate table.
//!
//! Every value is the number of units of that currency per 1 USD. The
//! table is constructed once at process start (from configuration or the
//! built-in defaults) and is immutable afterwards; updating it requires a
//! redeploy or restart.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;
use zakath_shared::config::RatesConfig;
use zakath_shared::types::CurrencyCode;

/// Immutable units-per-USD lookup table used to compute cross-rates when
/// no fresh cached rate exists.
#[derive(Debug, Clone)]
pub struct RateTable {
    per_usd: BTreeMap<CurrencyCode, Decimal>,
}

/// Built-in per-USD units: (code, units, scale).
const BUILTIN_PER_USD: &[(&str, i64, u32)] = &[
    ("USD", 10, 1),   // 1.0
    ("SAR", 375, 2),  // 3.75
    ("AED", 367, 2),  // 3.67
    ("INR", 8312, 2), // 83.12
    ("EUR", 92, 2),   // 0.92
    ("GBP", 79, 2),   // 0.79
    ("KWD", 31, 2),   // 0.31
    ("QAR", 364, 2),  // 3.64
    ("OMR", 385, 3),  // 0.385
    ("BHD", 376, 3),  // 0.376
    ("MYR", 447, 2),  // 4.47
    ("SGD", 134, 2),  // 1.34
];

impl RateTable {
    /// The built-in default table.
    #[must_use]
    pub fn builtin() -> Self {
        let per_usd = BUILTIN_PER_USD
            .iter()
            .filter_map(|(code, units, scale)| {
                let code = CurrencyCode::parse(code).ok()?;
                Some((code, Decimal::new(*units, *scale)))
            })
            .collect();
        Self { per_usd }
    }

    /// Builds a table from raw per-USD entries.
    ///
    /// Entries with malformed codes or non-positive values are skipped
    /// with a warning; rates must stay strictly positive.
    #[must_use]
    pub fn from_per_usd<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let mut per_usd = BTreeMap::new();
        for (code, units) in entries {
            let Ok(code) = CurrencyCode::parse(&code) else {
                warn!(code = %code, "Skipping malformed currency code in rate table");
                continue;
            };
            if units <= Decimal::ZERO {
                warn!(%code, %units, "Skipping non-positive rate table entry");
                continue;
            }
            per_usd.insert(code, units);
        }
        Self { per_usd }
    }

    /// Builds the table from configuration, falling back to the built-in
    /// table when no override is configured.
    #[must_use]
    pub fn from_config(config: &RatesConfig) -> Self {
        if config.per_usd.is_empty() {
            Self::builtin()
        } else {
            Self::from_per_usd(config.per_usd.iter().map(|(k, v)| (k.clone(), *v)))
        }
    }

    /// Units of `code` per 1 USD, if the currency is in the table.
    #[must_use]
    pub fn units_per_usd(&self, code: &CurrencyCode) -> Option<Decimal> {
        self.per_usd.get(code).copied()
    }

    /// Cross-rate through USD: `table[to] / table[from]`.
    ///
    /// `None` when either currency is absent from the table.
    #[must_use]
    pub fn cross_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Option<Decimal> {
        let from_units = self.units_per_usd(from)?;
        let to_units = self.units_per_usd(to)?;
        Some(to_units / from_units)
    }

    /// All currency codes in the table, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.per_usd.keys()
    }

    /// Number of currencies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.per_usd.len()
    }

    /// True when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.per_usd.is_empty()
    }
}
