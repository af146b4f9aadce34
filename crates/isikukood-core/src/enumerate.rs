//! Enumeration of every valid code matching a set of constraints.
//!
//! Pipeline:
//!   Constraints
//!     └─ resolve()              → deduplicated, range-checked sets
//!          └─ year × month × day → existing dates only
//!               └─ × gender      → IdentityRecords
//!                    └─ × sequence (parallel) → sorted Vec<IdentityCode>

use std::collections::BTreeSet;

use chrono::{Datelike, Utc};
use rayon::prelude::*;

use crate::{
  calendar::{self, MAX_YEAR, MIN_YEAR},
  code::IdentityCode,
  codec::{self, MAX_SEQUENCE},
  error::{Error, Result},
  record::{Gender, IdentityRecord},
};

// ─── Constraints ─────────────────────────────────────────────────────────────

/// Filters for [`generate`]. A `None` field falls back to its default:
/// both genders, days 1–31, months 1–12, the current year, and sequence
/// numbers 0–999.
///
/// Duplicate values are ignored and input order never affects the output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
  pub genders:   Option<Vec<Gender>>,
  pub days:      Option<Vec<u32>>,
  pub months:    Option<Vec<u32>>,
  pub years:     Option<Vec<i32>>,
  pub sequences: Option<Vec<u16>>,
}

impl Constraints {
  pub fn new() -> Self { Self::default() }

  pub fn genders(mut self, genders: impl IntoIterator<Item = Gender>) -> Self {
    self.genders = Some(genders.into_iter().collect());
    self
  }

  pub fn days(mut self, days: impl IntoIterator<Item = u32>) -> Self {
    self.days = Some(days.into_iter().collect());
    self
  }

  pub fn months(mut self, months: impl IntoIterator<Item = u32>) -> Self {
    self.months = Some(months.into_iter().collect());
    self
  }

  pub fn years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
    self.years = Some(years.into_iter().collect());
    self
  }

  pub fn sequences(mut self, sequences: impl IntoIterator<Item = u16>) -> Self {
    self.sequences = Some(sequences.into_iter().collect());
    self
  }
}

/// The constraint sets after defaults, deduplication and range checks.
struct Resolved {
  genders:   BTreeSet<Gender>,
  days:      BTreeSet<u32>,
  months:    BTreeSet<u32>,
  years:     BTreeSet<i32>,
  sequences: BTreeSet<u16>,
}

impl Constraints {
  fn resolve(&self) -> Result<Resolved> {
    let genders: BTreeSet<Gender> = match &self.genders {
      Some(genders) => genders.iter().copied().collect(),
      None => Gender::ALL.into_iter().collect(),
    };
    if genders.is_empty() {
      return Err(Error::NoGenders);
    }

    Ok(Resolved {
      genders,
      days: checked_set("day", self.days.as_deref(), 1..=31)?,
      months: checked_set("month", self.months.as_deref(), 1..=12)?,
      years: match self.years.as_deref() {
        Some(years) => checked_set("year", Some(years), MIN_YEAR..=MAX_YEAR)?,
        None => BTreeSet::from([Utc::now().year()]),
      },
      sequences: checked_set(
        "sequence",
        self.sequences.as_deref(),
        0..=MAX_SEQUENCE,
      )?,
    })
  }
}

/// Deduplicate `given`, or take the whole of `domain` when nothing was
/// given. The first value outside `domain` (in input order) is an error.
fn checked_set<T>(
  field: &'static str,
  given: Option<&[T]>,
  domain: std::ops::RangeInclusive<T>,
) -> Result<BTreeSet<T>>
where
  T: Copy + Ord + Into<i64>,
  std::ops::RangeInclusive<T>: Iterator<Item = T>,
{
  let Some(values) = given else {
    return Ok(domain.collect());
  };
  if let Some(&bad) = values.iter().find(|v| !domain.contains(*v)) {
    return Err(Error::out_of_range(field, bad, *domain.start(), *domain.end()));
  }
  Ok(values.iter().copied().collect())
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Every valid identity code matching `constraints`, sorted ascending.
///
/// Impossible dates produced by the cross product (30 February, 31 April,
/// 29 February outside leap years) are skipped rather than reported.
///
/// ```
/// use isikukood_core::{Constraints, generate};
///
/// let codes = generate(
///   &Constraints::new()
///     .days([1])
///     .months([1])
///     .years([2000])
///     .sequences([0, 1, 2]),
/// )
/// .unwrap();
/// assert_eq!(codes, [
///   "50001010006",
///   "50001010017",
///   "50001010028",
///   "60001010007",
///   "60001010018",
///   "60001010029",
/// ]);
/// ```
pub fn generate(constraints: &Constraints) -> Result<Vec<IdentityCode>> {
  let sets = constraints.resolve()?;

  let dates: Vec<_> = sets
    .years
    .iter()
    .flat_map(|&y| sets.months.iter().map(move |&m| (y, m)))
    .flat_map(|(y, m)| sets.days.iter().map(move |&d| (y, m, d)))
    .filter_map(|(y, m, d)| calendar::date(y, m, d))
    .collect();

  let records = sets
    .genders
    .iter()
    .flat_map(|&g| dates.iter().map(move |&date| IdentityRecord::new(g, date)))
    .collect::<Result<Vec<_>>>()?;

  let sequences: Vec<u16> = sets.sequences.into_iter().collect();
  let mut codes: Vec<IdentityCode> = records
    .par_iter()
    .flat_map_iter(|record| sequences.iter().map(move |&s| codec::build(record, s)))
    .collect();
  codes.par_sort_unstable();

  tracing::debug!(
    dates = dates.len(),
    records = records.len(),
    codes = codes.len(),
    "enumerated identity codes"
  );

  codec::assert_codec_consistency(None, &codes)?;
  Ok(codes)
}
