//! Hijri (Islamic lunar) calendar conversion.
//!
//! Uses the `icu_calendar` tabular Islamic calendar. Conversion failures
//! degrade to `None`; a missing Hijri label is treated as "unavailable,
//! not fatal" by every caller.

use chrono::{Datelike, NaiveDate};
use icu_calendar::{Date, islamic::IslamicCivil};

/// Converts a Gregorian date to a human-readable Hijri label,
/// e.g. `"17 Ramadan 1445"`.
///
/// Returns `None` if the date is out of the calendar's supported range or
/// the conversion fails for any other reason.
#[must_use]
pub fn to_hijri_label(date: NaiveDate) -> Option<String> {
    let month = u8::try_from(date.month()).ok()?;
    let day = u8::try_from(date.day()).ok()?;
    let iso = Date::try_new_iso_date(date.year(), month, day).ok()?;

    let hijri = iso.to_calendar(IslamicCivil::new());
    let year = hijri.year().number;
    let month = hijri.month().ordinal;
    let day = hijri.day_of_month().0;

    let month_name = hijri_month_name(month);
    if month_name.is_empty() {
        return None;
    }

    Some(format!("{day} {month_name} {year}"))
}

/// Converts a Hijri date to the corresponding Gregorian date.
///
/// Returns `None` for dates the calendar cannot represent.
#[must_use]
pub fn to_gregorian(hijri_year: i32, hijri_month: u8, hijri_day: u8) -> Option<NaiveDate> {
    let hijri = Date::try_new_islamic_civil_date_with_calendar(
        hijri_year,
        hijri_month,
        hijri_day,
        IslamicCivil::new(),
    )
    .ok()?;

    let iso = hijri.to_iso();
    NaiveDate::from_ymd_opt(
        iso.year().number,
        iso.month().ordinal,
        iso.day_of_month().0,
    )
}

/// English name of a Hijri month (1-12). Empty string for anything else.
#[must_use]
pub fn hijri_month_name(month: u32) -> &'static str {
    match month {
        1 => "Muharram",
        2 => "Safar",
        3 => "Rabi' al-Awwal",
        4 => "Rabi' al-Thani",
        5 => "Jumada al-Awwal",
        6 => "Jumada al-Thani",
        7 => "Rajab",
        8 => "Sha'ban",
        9 => "Ramadan",
        10 => "Shawwal",
        11 => "Dhu al-Qi'dah",
        12 => "Dhu al-Hijjah",
        _ => "",
    }
}

/// Arabic name of a Hijri month (1-12). Empty string for anything else.
#[must_use]
pub fn hijri_month_name_arabic(month: u32) -> &'static str {
    match month {
        1 => "محرم",
        2 => "صفر",
        3 => "ربيع الأول",
        4 => "ربيع الثاني",
        5 => "جمادى الأولى",
        6 => "جمادى الآخرة",
        7 => "رجب",
        8 => "شعبان",
        9 => "رمضان",
        10 => "شوال",
        11 => "ذو القعدة",
        12 => "ذو الحجة",
        _ => "",
    }
}
