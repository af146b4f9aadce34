//! The 11-digit wire form of an identity.
//!
//! ```text
//!  5  00  01  01  000  6
//!  │  │   │   │   │    └─ checksum over the first ten digits
//!  │  │   │   │   └────── sequence number, 000–999
//!  │  │   │   └────────── day
//!  │  │   └────────────── month
//!  │  └────────────────── year within the century
//!  └───────────────────── century and gender marker, 1–8
//! ```

use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  codec,
  error::{Error, Result},
  record::{Gender, IdentityRecord},
};

/// A validated identity code.
///
/// Values only come out of [`codec::encode`] and friends or out of parsing,
/// so every `IdentityCode` decodes cleanly. Ordering is the lexicographic
/// order of the digit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityCode {
  code:   String,
  record: IdentityRecord,
}

impl IdentityCode {
  /// Pair an already-checked digit string with the record it encodes.
  pub(crate) fn from_parts(code: String, record: IdentityRecord) -> Self {
    Self { code, record }
  }

  pub fn as_str(&self) -> &str { &self.code }

  pub fn into_string(self) -> String { self.code }

  /// Gender and birth date, with the sequence number dropped.
  pub fn record(&self) -> &IdentityRecord { &self.record }

  pub fn gender(&self) -> Gender { Gender::from_marker(self.marker()) }

  pub fn birthdate(&self) -> NaiveDate { self.record.birthdate() }

  /// The century/gender marker, position 0.
  pub fn marker(&self) -> u8 { self.digit(0) }

  /// The same-day sequence number, positions 7–9.
  ///
  /// ```
  /// let code: isikukood_core::IdentityCode = "50001010104".parse().unwrap();
  /// assert_eq!(code.sequence(), 10);
  /// ```
  pub fn sequence(&self) -> u16 {
    self.code.as_bytes()[7..10]
      .iter()
      .fold(0, |n, b| n * 10 + u16::from(b - b'0'))
  }

  pub fn checksum_digit(&self) -> u8 { self.digit(10) }

  fn digit(&self, position: usize) -> u8 { self.code.as_bytes()[position] - b'0' }
}

impl FromStr for IdentityCode {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let record = codec::decode(s)?;
    Ok(Self::from_parts(s.to_string(), record))
  }
}

impl TryFrom<String> for IdentityCode {
  type Error = Error;

  fn try_from(code: String) -> Result<Self> {
    let record = codec::decode(&code)?;
    Ok(Self::from_parts(code, record))
  }
}

impl From<IdentityCode> for String {
  fn from(code: IdentityCode) -> Self { code.code }
}

impl Ord for IdentityCode {
  fn cmp(&self, other: &Self) -> Ordering { self.code.cmp(&other.code) }
}

impl PartialOrd for IdentityCode {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl AsRef<str> for IdentityCode {
  fn as_ref(&self) -> &str { &self.code }
}

impl fmt::Display for IdentityCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.code)
  }
}

impl PartialEq<str> for IdentityCode {
  fn eq(&self, other: &str) -> bool { self.code == other }
}

impl PartialEq<&str> for IdentityCode {
  fn eq(&self, other: &&str) -> bool { self.code == *other }
}
