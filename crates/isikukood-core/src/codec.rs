//! Conversion between [`IdentityRecord`]s and [`IdentityCode`]s.
//!
//! Pipeline:
//!   &str
//!     └─ decode()            → IdentityRecord
//!   IdentityRecord + sequence
//!     └─ build()             → IdentityCode
//!          └─ assert_codec_consistency() over everything produced

use std::collections::HashSet;

use chrono::Datelike;
use rayon::prelude::*;

use crate::{
  calendar::{self, MAX_YEAR, MIN_YEAR},
  checksum::{self, CODE_LEN},
  code::IdentityCode,
  error::{Error, Result},
  record::{self, IdentityRecord},
};

/// Highest sequence number a code can carry.
pub const MAX_SEQUENCE: u16 = 999;

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Fully validate `code` and return the record it encodes.
///
/// Checks run in a fixed order so the reported error is predictable: digit
/// format, marker, year window, calendar date, checksum.
///
/// ```
/// use isikukood_core::{Gender, decode};
///
/// let record = decode("50001010006").unwrap();
/// assert_eq!(record.gender(), Gender::Male);
/// assert_eq!(record.birthdate().to_string(), "2000-01-01");
/// ```
pub fn decode(code: &str) -> Result<IdentityRecord> {
  if !code.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::NotNumeric {
      input: code.to_string(),
    });
  }
  if code.len() != CODE_LEN {
    return Err(Error::WrongLength {
      input:    code.to_string(),
      actual:   code.len(),
      expected: "11",
    });
  }

  let bytes = code.as_bytes();
  let digit = |i: usize| u32::from(bytes[i] - b'0');
  let pair = |i: usize| digit(i) * 10 + digit(i + 1);

  let marker = bytes[0] - b'0';
  let (century, gender) = record::marker_century(marker)
    .ok_or_else(|| Error::out_of_range("marker", marker, 1, 8))?;

  let year = century + pair(1) as i32;
  let month = pair(3);
  let day = pair(5);

  if !calendar::year_in_range(year) {
    return Err(Error::out_of_range("year", year, MIN_YEAR, MAX_YEAR));
  }
  let birthdate = calendar::date(year, month, day)
    .ok_or(Error::NonexistentDate { year, month, day })?;

  let expected = checksum::compute(&bytes[..checksum::BASE_LEN]);
  let found = bytes[10] - b'0';
  if expected != found {
    return Err(Error::ChecksumMismatch {
      code: code.to_string(),
      expected,
      found,
    });
  }

  IdentityRecord::new(gender, birthdate)
}

// ─── Encoding ────────────────────────────────────────────────────────────────

/// Encode `record` with a single sequence number.
///
/// ```
/// use isikukood_core::{Gender, IdentityRecord, encode};
///
/// let record = IdentityRecord::from_ymd(Gender::Male, 2000, 1, 1).unwrap();
/// assert_eq!(encode(&record, 111).unwrap().as_str(), "50001011112");
/// ```
pub fn encode(record: &IdentityRecord, sequence: u16) -> Result<IdentityCode> {
  check_sequence(sequence)?;
  let code = build(record, sequence);
  assert_codec_consistency(Some(record), std::slice::from_ref(&code))?;
  Ok(code)
}

/// Encode `record` once per entry of `sequences`, keeping their order.
///
/// Fails fast: the first out-of-range or repeated sequence number aborts the
/// whole call and nothing is returned.
pub fn construct_many(
  record: &IdentityRecord,
  sequences: &[u16],
) -> Result<Vec<IdentityCode>> {
  let mut seen = HashSet::with_capacity(sequences.len());
  let mut codes = Vec::with_capacity(sequences.len());

  for &sequence in sequences {
    check_sequence(sequence)?;
    if !seen.insert(sequence) {
      return Err(Error::DuplicateSequence(sequence));
    }
    codes.push(build(record, sequence));
  }

  assert_codec_consistency(Some(record), &codes)?;
  Ok(codes)
}

/// All 1000 codes for `record`, sequence numbers 000 to 999 in order.
///
/// Bad input is impossible here; an error means the consistency check
/// caught a defect.
pub fn construct_all(record: &IdentityRecord) -> Result<Vec<IdentityCode>> {
  let codes: Vec<_> = (0..=MAX_SEQUENCE).map(|s| build(record, s)).collect();
  assert_codec_consistency(Some(record), &codes)?;
  Ok(codes)
}

pub(crate) fn check_sequence(sequence: u16) -> Result<()> {
  if sequence > MAX_SEQUENCE {
    return Err(Error::out_of_range("sequence", sequence, 0, MAX_SEQUENCE));
  }
  Ok(())
}

/// Assemble the code for `record` and an in-range `sequence`.
pub(crate) fn build(record: &IdentityRecord, sequence: u16) -> IdentityCode {
  let date = record.birthdate();
  let base = format!(
    "{}{:02}{:02}{:02}{:03}",
    record.marker(),
    date.year() % 100,
    date.month(),
    date.day(),
    sequence,
  );
  let digit = checksum::compute(base.as_bytes());
  IdentityCode::from_parts(format!("{base}{digit}"), *record)
}

// ─── Self-check ──────────────────────────────────────────────────────────────

/// Re-validate codes produced by this crate.
///
/// Every code must be unique, must decode on its own, and must decode to the
/// record it carries (and to `expected`, when given). A failure here is a bug
/// in the engine rather than bad input, and is reported as
/// [`Error::InternalConsistency`].
pub fn assert_codec_consistency(
  expected: Option<&IdentityRecord>,
  codes: &[IdentityCode],
) -> Result<()> {
  let mut seen = HashSet::with_capacity(codes.len());
  if let Some(dup) = codes.iter().find(|c| !seen.insert(c.as_str())) {
    return Err(inconsistent(format!("duplicate code {dup}")));
  }

  codes.par_iter().try_for_each(|code| {
    let decoded = decode(code.as_str())
      .map_err(|e| inconsistent(format!("{code} does not re-validate: {e}")))?;
    if decoded != *code.record() {
      return Err(inconsistent(format!(
        "{code} decodes to {decoded}, expected {}",
        code.record()
      )));
    }
    match expected {
      Some(record) if decoded != *record => Err(inconsistent(format!(
        "{code} decodes to {decoded}, expected {record}"
      ))),
      _ => Ok(()),
    }
  })
}

fn inconsistent(message: String) -> Error {
  tracing::error!(%message, "identity code consistency check failed");
  Error::InternalConsistency(message)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::{error::ErrorKind, record::Gender};

  fn male_2000() -> IdentityRecord {
    IdentityRecord::from_ymd(Gender::Male, 2000, 1, 1).unwrap()
  }

  #[test]
  fn decode_valid_code() {
    let record = decode("50001010006").unwrap();
    assert_eq!(record, male_2000());

    let record = decode("60001010007").unwrap();
    assert_eq!(record.gender(), Gender::Female);
  }

  #[test]
  fn decode_error_kinds() {
    let cases = [
      ("90001010006", ErrorKind::Range),
      ("00001010006", ErrorKind::Range),
      ("50001010000", ErrorKind::Semantic),
      ("500010100060", ErrorKind::Format),
      ("5000101000", ErrorKind::Format),
      ("50001x10006", ErrorKind::Format),
      ("", ErrorKind::Format),
      ("50000000000", ErrorKind::Semantic),
      ("50000000005", ErrorKind::Semantic),
      ("38001085710", ErrorKind::Semantic),
    ];
    for (input, kind) in cases {
      let err = decode(input).unwrap_err();
      assert_eq!(err.kind(), kind, "{input}: {err}");
    }
  }

  #[test]
  fn decode_reports_specific_failures() {
    assert!(matches!(
      decode("90001010006").unwrap_err(),
      Error::OutOfRange { field: "marker", value: 9, .. }
    ));
    assert!(matches!(
      decode("50001010000").unwrap_err(),
      Error::ChecksumMismatch { expected: 6, found: 0, .. }
    ));
    // 2001-02-29 fails on the date before the checksum is looked at.
    assert!(matches!(
      decode("50102290000").unwrap_err(),
      Error::NonexistentDate { year: 2001, month: 2, day: 29 }
    ));
  }

  #[test]
  fn encode_known_codes() {
    let record = male_2000();
    assert_eq!(encode(&record, 0).unwrap(), "50001010006");
    assert_eq!(encode(&record, 10).unwrap(), "50001010104");
    assert_eq!(encode(&record, 100).unwrap(), "50001011003");
    assert_eq!(encode(&record, 999).unwrap(), "50001019993");
    assert_eq!(encode(&record, 4).unwrap(), "50001010040");
    assert_eq!(encode(&record, 16).unwrap(), "50001010167");
  }

  #[test]
  fn encode_pads_year_month_and_day() {
    let record = IdentityRecord::from_ymd(Gender::Female, 1905, 3, 7).unwrap();
    let code = encode(&record, 42).unwrap();
    assert!(code.as_str().starts_with("4050307042"), "{code}");
    assert_eq!(decode(code.as_str()).unwrap(), record);
  }

  #[test]
  fn encode_rejects_sequence_over_999() {
    let err = encode(&male_2000(), 1000).unwrap_err();
    assert!(matches!(
      err,
      Error::OutOfRange { field: "sequence", value: 1000, .. }
    ));
  }

  #[test]
  fn construct_many_keeps_order() {
    let record = male_2000();
    assert!(construct_many(&record, &[]).unwrap().is_empty());
    assert_eq!(construct_many(&record, &[0]).unwrap(), ["50001010006"]);
    assert_eq!(
      construct_many(&record, &[0, 1, 2, 3]).unwrap(),
      ["50001010006", "50001010017", "50001010028", "50001010039"]
    );
    assert_eq!(
      construct_many(&record, &[111, 222, 333]).unwrap(),
      ["50001011112", "50001012229", "50001013335"]
    );
    assert_eq!(
      construct_many(&record, &[2, 0]).unwrap(),
      ["50001010028", "50001010006"]
    );
  }

  #[test]
  fn construct_many_fails_on_first_bad_value() {
    let err = construct_many(&male_2000(), &[0, 1000, 5000]).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { value: 1000, .. }));

    let err = construct_many(&male_2000(), &[3, 7, 3, 2000]).unwrap_err();
    assert!(matches!(err, Error::DuplicateSequence(3)));
    assert_eq!(err.kind(), ErrorKind::Semantic);
  }

  #[test]
  fn construct_all_yields_every_sequence() {
    let record = IdentityRecord::from_ymd(Gender::Female, 1999, 12, 31).unwrap();
    let codes = construct_all(&record).unwrap();

    assert_eq!(codes.len(), 1000);
    assert!(codes.windows(2).all(|w| w[0] < w[1]));
    for (i, code) in codes.iter().enumerate() {
      assert_eq!(usize::from(code.sequence()), i);
      assert_eq!(decode(code.as_str()).unwrap(), record);
    }
  }

  #[test]
  fn consistency_check_flags_duplicates() {
    let code = encode(&male_2000(), 0).unwrap();
    let err = assert_codec_consistency(None, &[code.clone(), code]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalConsistency);
  }

  #[test]
  fn consistency_check_flags_bad_codes() {
    let record = male_2000();
    let forged = IdentityCode::from_parts("50001010000".to_string(), record);
    let err = assert_codec_consistency(Some(&record), &[forged]).unwrap_err();
    assert!(matches!(err, Error::InternalConsistency(_)));
  }

  #[test]
  fn consistency_check_flags_wrong_record() {
    let code = encode(&male_2000(), 5).unwrap();
    let other = male_2000()
      .with_birthdate(NaiveDate::from_ymd_opt(2000, 1, 2).unwrap())
      .unwrap();
    let err = assert_codec_consistency(Some(&other), &[code]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalConsistency);
  }
}
