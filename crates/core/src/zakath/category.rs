//! Asset bucket classification.
//!
//! Preferred path: an asset carries an explicit `AssetBucket` tag decided
//! at data-entry time (from its category master entry). Legacy records
//! without a tag fall back to `classify_label`, a case-insensitive
//! substring match over the asset's category and item names.

use serde::{Deserialize, Serialize};

/// The five zakath asset buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetBucket {
    /// Cash, bank balances, savings.
    Cash,
    /// Gold holdings.
    Gold,
    /// Silver holdings.
    Silver,
    /// Stocks, bonds, investment funds.
    Investments,
    /// Everything else.
    Other,
}

impl AssetBucket {
    /// Storage representation of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Investments => "investments",
            Self::Other => "other",
        }
    }

    /// Parses the storage representation.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(Self::Cash),
            "gold" => Some(Self::Gold),
            "silver" => Some(Self::Silver),
            "investments" => Some(Self::Investments),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a free-text asset label into a bucket.
///
/// Checks run in a fixed order and the first match wins: cash-like terms,
/// then gold, silver, investment terms, then `Other`. "Gold Investment
/// Fund" is therefore `Gold`, not `Investments`.
#[must_use]
pub fn classify_label(label: &str) -> AssetBucket {
    let label = label.to_lowercase();

    if ["cash", "bank", "saving"].iter().any(|t| label.contains(t)) {
        AssetBucket::Cash
    } else if label.contains("gold") {
        AssetBucket::Gold
    } else if label.contains("silver") {
        AssetBucket::Silver
    } else if ["invest", "stock", "bond"].iter().any(|t| label.contains(t)) {
        AssetBucket::Investments
    } else {
        AssetBucket::Other
    }
}
