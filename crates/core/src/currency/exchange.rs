//! Exchange rate record types.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use zakath_shared::types::CurrencyCode;

/// Where an exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    /// Computed by the system from the static cross-rate table.
    System,
    /// Entered manually by an operator.
    Manual,
}

impl RateSource {
    /// Storage representation of the source tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Manual => "Manual",
        }
    }

    /// Parses the storage representation. Unknown tags map to `Manual`.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "System" => Self::System,
            _ => Self::Manual,
        }
    }
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored exchange rate between two currencies.
///
/// Invariant: `rate > 0`. Multiple historical records may exist per pair;
/// only the most recent active one matters for freshness decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecord {
    /// Source currency code.
    pub from_currency: CurrencyCode,
    /// Target currency code.
    pub to_currency: CurrencyCode,
    /// Multiplicative rate (1 `from_currency` = `rate` `to_currency`).
    pub rate: Decimal,
    /// When this rate took effect.
    pub effective_at: DateTime<Utc>,
    /// Where the rate came from.
    pub source: RateSource,
    /// Whether the record participates in lookups.
    pub is_active: bool,
}

impl RateRecord {
    /// Returns true while the record is within its freshness window.
    ///
    /// The boundary is inclusive: a record exactly `freshness` old is
    /// still fresh.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, freshness: Duration) -> bool {
        now - self.effective_at <= freshness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(effective_at: DateTime<Utc>) -> RateRecord {
        RateRecord {
            from_currency: CurrencyCode::parse("EUR").unwrap(),
            to_currency: CurrencyCode::usd(),
            rate: dec!(1.0870),
            effective_at,
            source: RateSource::System,
            is_active: true,
        }
    }

    #[test]
    fn test_fresh_exactly_at_boundary() {
        let now = Utc::now();
        let rec = record(now - Duration::days(7));
        assert!(rec.is_fresh(now, Duration::days(7)));
    }

    #[test]
    fn test_stale_past_boundary() {
        let now = Utc::now();
        let rec = record(now - Duration::days(7) - Duration::minutes(15));
        assert!(!rec.is_fresh(now, Duration::days(7)));
    }

    #[test]
    fn test_rate_source_roundtrip() {
        assert_eq!(RateSource::from_str_lossy(RateSource::System.as_str()), RateSource::System);
        assert_eq!(RateSource::from_str_lossy("Manual"), RateSource::Manual);
        assert_eq!(RateSource::from_str_lossy("something-else"), RateSource::Manual);
    }
}
