//! The mod-11 check digit that closes every identity code.
//!
//! The official algorithm weighs the first ten digits twice if needed: a
//! first pass with `FIRST_WEIGHTS`, and, only when that pass leaves a
//! remainder of 10, a second pass with `SECOND_WEIGHTS`. A second
//! remainder of 10 collapses to a check digit of 0.

use crate::error::{Error, Result};

/// Number of digits the checksum is computed over.
pub const BASE_LEN: usize = 10;

/// Full length of an identity code, checksum included.
pub const CODE_LEN: usize = 11;

const FIRST_WEIGHTS: [u32; BASE_LEN] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 1];
const SECOND_WEIGHTS: [u32; BASE_LEN] = [3, 4, 5, 6, 7, 8, 9, 1, 2, 3];

/// Compute the check digit for `base`.
///
/// `base` must be 10 or 11 ASCII digits; with 11, the trailing digit is
/// ignored.
///
/// ```
/// assert_eq!(isikukood_core::checksum("5000101000").unwrap(), 6);
/// assert_eq!(isikukood_core::checksum("50001010006").unwrap(), 6);
/// ```
pub fn checksum(base: &str) -> Result<u8> {
  if !base.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::NotNumeric {
      input: base.to_string(),
    });
  }
  if base.len() != BASE_LEN && base.len() != CODE_LEN {
    return Err(Error::WrongLength {
      input:    base.to_string(),
      actual:   base.len(),
      expected: "10 or 11",
    });
  }
  Ok(compute(&base.as_bytes()[..BASE_LEN]))
}

/// Replace (or append) the 11th character of `code` with a freshly
/// computed check digit.
///
/// Only the first ten characters are inspected and they must be digits;
/// the 11th, if present, may be anything. The marker and date are not
/// validated, so the result is not guaranteed to decode.
///
/// ```
/// assert_eq!(
///   isikukood_core::insert_checksum("5000101000x").unwrap(),
///   "50001010006"
/// );
/// ```
pub fn insert_checksum(code: &str) -> Result<String> {
  if code.len() != BASE_LEN && code.len() != CODE_LEN {
    return Err(Error::WrongLength {
      input:    code.to_string(),
      actual:   code.len(),
      expected: "10 or 11",
    });
  }
  let base = code.get(..BASE_LEN).ok_or_else(|| Error::NotNumeric {
    input: code.to_string(),
  })?;
  let digit = checksum(base)?;
  Ok(format!("{base}{digit}"))
}

/// Check digit over exactly ten ASCII digits. Callers validate the input.
pub(crate) fn compute(digits: &[u8]) -> u8 {
  debug_assert_eq!(digits.len(), BASE_LEN);

  let remainder = weighted_remainder(digits, &FIRST_WEIGHTS);
  if remainder < 10 {
    return remainder;
  }

  match weighted_remainder(digits, &SECOND_WEIGHTS) {
    10 => 0,
    r => r,
  }
}

fn weighted_remainder(digits: &[u8], weights: &[u32; BASE_LEN]) -> u8 {
  let sum: u32 = digits
    .iter()
    .zip(weights)
    .map(|(d, w)| u32::from(d - b'0') * w)
    .sum();
  (sum % 11) as u8
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ErrorKind;

  #[test]
  fn first_pass_digit() {
    assert_eq!(checksum("5000101000").unwrap(), 6);
    assert_eq!(checksum("5000101001").unwrap(), 7);
    assert_eq!(checksum("3800108571").unwrap(), 8);
  }

  #[test]
  fn second_pass_digit() {
    // First pass: 5 + 5 + 7 + 9 + 6 = 32, 32 % 11 == 10.
    // Second pass: 15 + 7 + 9 + 2 + 18 = 51, 51 % 11 == 7.
    assert_eq!(checksum("5000101016").unwrap(), 7);
  }

  #[test]
  fn both_passes_ten_collapse_to_zero() {
    // First pass: 5 + 5 + 7 + 4 = 21, second pass: 15 + 7 + 9 + 12 = 43.
    assert_eq!(checksum("5000101004").unwrap(), 0);
  }

  #[test]
  fn eleven_digit_input_ignores_last_digit() {
    assert_eq!(checksum("50001010000").unwrap(), 6);
    assert_eq!(checksum("50001010009").unwrap(), 6);
  }

  #[test]
  fn rejects_non_numeric() {
    let err = checksum("50001x1000").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(matches!(err, Error::NotNumeric { .. }));
  }

  #[test]
  fn rejects_wrong_length() {
    for input in ["", "500010100", "500010100060"] {
      let err = checksum(input).unwrap_err();
      assert!(
        matches!(err, Error::WrongLength { .. }),
        "{input:?} gave {err:?}"
      );
    }
  }

  #[test]
  fn insert_overwrites_last_character() {
    assert_eq!(insert_checksum("5000101000x").unwrap(), "50001010006");
    assert_eq!(insert_checksum("50001010009").unwrap(), "50001010006");
    assert_eq!(insert_checksum("5000101000").unwrap(), "50001010006");
    assert_eq!(insert_checksum("5000101004").unwrap(), "50001010040");
  }

  #[test]
  fn insert_rejects_bad_base() {
    assert_eq!(
      insert_checksum("500010100").unwrap_err().kind(),
      ErrorKind::Format
    );
    assert_eq!(
      insert_checksum("50001x1000").unwrap_err().kind(),
      ErrorKind::Format
    );
  }
}
