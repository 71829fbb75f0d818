//! Small, deterministic calendar rules used by the cadence generator.
//!
//! Month stepping clamps to the last day of the target month
//! (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year). Stepping is always
//! applied to the current date, so a clamped or weekend-shifted day of month
//! carries forward into later steps.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Rolls a Saturday or Sunday forward to the following Monday.
///
/// Returns `None` only when the shifted date falls outside chrono's range.
pub fn roll_to_weekday(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)),
        Weekday::Sun => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

pub fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}
