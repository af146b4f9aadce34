//! Calendar predicates over the supported birth-year window.

use chrono::NaiveDate;

/// Earliest birth year an identity code can express (marker 1 or 2).
pub const MIN_YEAR: i32 = 1800;

/// Latest birth year an identity code can express (marker 7 or 8).
pub const MAX_YEAR: i32 = 2199;

/// Whether `year-month-day` is a real proleptic Gregorian date.
///
/// Leap years follow the usual rule: divisible by 4, except centuries not
/// divisible by 400.
pub fn exists(year: i32, month: u32, day: u32) -> bool {
  date(year, month, day).is_some()
}

/// The date for `year-month-day`, if it exists.
pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, month, day)
}

pub fn year_in_range(year: i32) -> bool { (MIN_YEAR..=MAX_YEAR).contains(&year) }
