//! Currency conversion arithmetic.
//!
//! CRITICAL: conversion itself never rounds; rounding happens only at
//! presentation boundaries (snapshot persistence, API responses) using
//! banker's rounding to minimize cumulative errors.

use rust_decimal::{Decimal, RoundingStrategy};

/// Converts an amount using the given exchange rate, without rounding.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate
}

/// Rounds a value for presentation or persistence.
///
/// Uses banker's rounding (round half to even).
#[must_use]
pub fn round_presentation(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_amount_exact() {
        // 1000 EUR at 1.0870 = 1087.00 exactly, no rounding applied
        assert_eq!(convert_amount(dec!(1000), dec!(1.0870)), dec!(1087.0000));
    }

    #[test]
    fn test_convert_amount_keeps_precision() {
        // 100.50 * 3.675 = 369.3375 stays exact
        assert_eq!(convert_amount(dec!(100.50), dec!(3.675)), dec!(369.33750));
    }

    #[test]
    fn test_round_presentation_bankers() {
        // half-to-even at 2 decimals
        assert_eq!(round_presentation(dec!(2.125), 2), dec!(2.12));
        assert_eq!(round_presentation(dec!(2.135), 2), dec!(2.14));
        assert_eq!(round_presentation(dec!(257.5), 2), dec!(257.50));
    }
}
