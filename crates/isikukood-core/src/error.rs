//! Error types for `isikukood-core`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an [`Error`].
///
/// Everything except [`ErrorKind::InternalConsistency`] is caused by bad
/// input; an internal-consistency failure is a defect in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// Input is not purely numeric or has the wrong digit count.
  Format,
  /// A numeric field lies outside its permitted domain.
  Range,
  /// Well-formed input that is still invalid (bad date, bad checksum).
  Semantic,
  /// Generated output failed its own re-validation.
  InternalConsistency,
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Format => "format",
      Self::Range => "range",
      Self::Semantic => "semantic",
      Self::InternalConsistency => "internal_consistency",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{input:?} must be numeric")]
  NotNumeric { input: String },

  #[error("{input:?} is {actual} characters long, expected {expected}")]
  WrongLength {
    input:    String,
    actual:   usize,
    expected: &'static str,
  },

  #[error("{field} was {value}, expected a value between {min} and {max} (incl.)")]
  OutOfRange {
    field: &'static str,
    value: i64,
    min:   i64,
    max:   i64,
  },

  #[error("unknown gender {0:?}, expected m or f")]
  UnknownGender(String),

  #[error("genders must contain male, female, or both")]
  NoGenders,

  #[error("date {year:04}-{month:02}-{day:02} does not exist")]
  NonexistentDate { year: i32, month: u32, day: u32 },

  #[error("invalid checksum for {code}: expected {expected}, found {found}")]
  ChecksumMismatch {
    code:     String,
    expected: u8,
    found:    u8,
  },

  #[error("sequence number {0} requested more than once")]
  DuplicateSequence(u16),

  #[error("internal consistency check failed (this is a bug): {0}")]
  InternalConsistency(String),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NotNumeric { .. } | Self::WrongLength { .. } => ErrorKind::Format,
      Self::OutOfRange { .. } | Self::UnknownGender(_) | Self::NoGenders => {
        ErrorKind::Range
      }
      Self::NonexistentDate { .. }
      | Self::ChecksumMismatch { .. }
      | Self::DuplicateSequence(_) => ErrorKind::Semantic,
      Self::InternalConsistency(_) => ErrorKind::InternalConsistency,
    }
  }

  pub(crate) fn out_of_range(
    field: &'static str,
    value: impl Into<i64>,
    min: impl Into<i64>,
    max: impl Into<i64>,
  ) -> Self {
    Self::OutOfRange {
      field,
      value: value.into(),
      min: min.into(),
      max: max.into(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
