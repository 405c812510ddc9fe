//! Gregorian/Hijri conversion and lunar-year (hawl) arithmetic.
//!
//! Calendar conversion is strictly best-effort: a date that cannot be
//! converted yields `None`, never an error, so numeric calculations are
//! never blocked by calendar issues.

pub mod hawl;
pub mod hijri;

pub use hawl::{LUNAR_YEAR_DAYS, days_between, hawl_end_date, is_hawl_complete};
pub use hijri::{hijri_month_name, hijri_month_name_arabic, to_gregorian, to_hijri_label};
