//! The structured side of an identity code: gender and birth date.
//!
//! An [`IdentityRecord`] can only be built through validating constructors,
//! so holding one proves the birth date exists and falls inside the
//! 1800–2199 window that the marker digit can express.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
  calendar::{self, MAX_YEAR, MIN_YEAR},
  error::{Error, Result},
};

// ─── Gender ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

  /// Gender encoded by a marker digit: odd is male, even is female.
  pub fn from_marker(marker: u8) -> Self {
    if marker % 2 == 0 { Self::Female } else { Self::Male }
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(match self {
      Self::Male => "male",
      Self::Female => "female",
    })
  }
}

impl FromStr for Gender {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "m" | "male" => Ok(Self::Male),
      "f" | "female" => Ok(Self::Female),
      _ => Err(Error::UnknownGender(s.to_string())),
    }
  }
}

// ─── Century markers ─────────────────────────────────────────────────────────

/// First year of the century and the gender for markers 1 through 8.
const MARKERS: [(i32, Gender); 8] = [
  (1800, Gender::Male),
  (1800, Gender::Female),
  (1900, Gender::Male),
  (1900, Gender::Female),
  (2000, Gender::Male),
  (2000, Gender::Female),
  (2100, Gender::Male),
  (2100, Gender::Female),
];

/// Century start year and gender for `marker`, or `None` outside 1–8.
pub fn marker_century(marker: u8) -> Option<(i32, Gender)> {
  MARKERS.get(usize::from(marker).checked_sub(1)?).copied()
}

/// The marker digit (1–8) for someone of `gender` born in `year`.
///
/// ```
/// use isikukood_core::{Gender, gender_marker};
///
/// assert_eq!(gender_marker(2000, Gender::Male).unwrap(), 5);
/// assert_eq!(gender_marker(1999, Gender::Male).unwrap(), 3);
/// ```
pub fn gender_marker(year: i32, gender: Gender) -> Result<u8> {
  let century = year.div_euclid(100) * 100;
  MARKERS
    .iter()
    .position(|&entry| entry == (century, gender))
    .map(|i| i as u8 + 1)
    .ok_or_else(|| Error::out_of_range("year", year, MIN_YEAR, MAX_YEAR))
}

// ─── IdentityRecord ──────────────────────────────────────────────────────────

/// Gender and birth date of a person, without the sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecordFields", into = "RecordFields")]
pub struct IdentityRecord {
  gender:    Gender,
  birthdate: NaiveDate,
  marker:    u8,
}

/// Wire shape of [`IdentityRecord`]; deserialising goes through
/// [`IdentityRecord::new`].
#[derive(Serialize, Deserialize)]
struct RecordFields {
  gender:    Gender,
  birthdate: NaiveDate,
}

impl IdentityRecord {
  pub fn new(gender: Gender, birthdate: NaiveDate) -> Result<Self> {
    let marker = gender_marker(birthdate.year(), gender)?;
    Ok(Self {
      gender,
      birthdate,
      marker,
    })
  }

  /// Build a record from raw date parts, rejecting years outside the window
  /// before checking that the date exists.
  pub fn from_ymd(gender: Gender, year: i32, month: u32, day: u32) -> Result<Self> {
    if !calendar::year_in_range(year) {
      return Err(Error::out_of_range("year", year, MIN_YEAR, MAX_YEAR));
    }
    let birthdate = calendar::date(year, month, day)
      .ok_or(Error::NonexistentDate { year, month, day })?;
    Self::new(gender, birthdate)
  }

  pub fn gender(&self) -> Gender { self.gender }

  pub fn birthdate(&self) -> NaiveDate { self.birthdate }

  /// The century/gender marker digit this record encodes to.
  pub fn marker(&self) -> u8 { self.marker }

  /// A copy of this record with a different gender.
  pub fn with_gender(&self, gender: Gender) -> Result<Self> {
    Self::new(gender, self.birthdate)
  }

  /// A copy of this record with a different birth date, re-validated.
  pub fn with_birthdate(&self, birthdate: NaiveDate) -> Result<Self> {
    Self::new(self.gender, birthdate)
  }
}

impl TryFrom<RecordFields> for IdentityRecord {
  type Error = Error;

  fn try_from(fields: RecordFields) -> Result<Self> {
    Self::new(fields.gender, fields.birthdate)
  }
}

impl From<IdentityRecord> for RecordFields {
  fn from(record: IdentityRecord) -> Self {
    Self {
      gender:    record.gender,
      birthdate: record.birthdate,
    }
  }
}

impl fmt::Display for IdentityRecord {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}, born {}", self.gender, self.birthdate)
  }
}
