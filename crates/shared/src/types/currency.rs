//! Currency code type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` for exact decimal arithmetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A malformed currency code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid currency code: {0:?}")]
pub struct InvalidCurrencyCode(pub String);

/// A 3-letter uppercase ISO 4217 currency code (e.g., "USD", "SAR").
///
/// The set of currencies is data-driven (a currency registry row in the
/// database), so this is a validated string rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    ///
    /// Accepts lowercase input and uppercases it. Rejects anything that is
    /// not exactly three ASCII letters.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCurrencyCode`] describing the malformed input.
    pub fn parse(code: &str) -> Result<Self, InvalidCurrencyCode> {
        let code = code.trim();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(InvalidCurrencyCode(code.to_string()))
        }
    }

    /// The US dollar, the system's reference currency.
    #[must_use]
    pub fn usd() -> Self {
        Self("USD".to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
