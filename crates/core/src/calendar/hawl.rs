//! Lunar-year (hawl) arithmetic.
//!
//! Wealth must be held for one full lunar year (hawl) before zakath is owed
//! on it. The engine uses the conventional 354-day approximation of the
//! lunar year everywhere; madhab rules carry their own `hawl_period_days`
//! field, but that field is never consulted here (see `zakath::MadhabRule`).

use chrono::{Days, NaiveDate};

/// Length of the lunar year in days, as used for all hawl windowing.
pub const LUNAR_YEAR_DAYS: i64 = 354;

/// Exact calendar-day difference between two dates.
///
/// Negative when `end` is before `start`.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Returns true once a full lunar year has elapsed between the two dates.
#[must_use]
pub fn is_hawl_complete(start: NaiveDate, end: NaiveDate) -> bool {
    days_between(start, end) >= LUNAR_YEAR_DAYS
}

/// The date on which the hawl that started at `start` completes.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn hawl_end_date(start: NaiveDate) -> NaiveDate {
    start
        .checked_add_days(Days::new(LUNAR_YEAR_DAYS as u64))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_days_between_signed() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
        assert_eq!(days_between(start, end), 10);
        assert_eq!(days_between(end, start), -10);
        assert_eq!(days_between(start, start), 0);
    }

    #[test]
    fn test_hawl_complete_at_exactly_354_days() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let start = end - Duration::days(354);
        assert!(is_hawl_complete(start, end));
    }

    #[test]
    fn test_hawl_incomplete_at_353_days() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let start = end - Duration::days(353);
        assert!(!is_hawl_complete(start, end));
    }

    #[test]
    fn test_hawl_end_date_adds_lunar_year() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = hawl_end_date(start);
        assert_eq!(days_between(start, end), LUNAR_YEAR_DAYS);
        assert!(is_hawl_complete(start, end));
    }
}
