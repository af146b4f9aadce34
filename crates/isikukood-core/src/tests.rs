//! End-to-end checks across the codec, the checksum and the enumerator.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use crate::{
  Constraints, ErrorKind, Gender, IdentityCode, IdentityRecord, calendar,
  checksum, construct_all, construct_many, decode, encode, gender_marker,
  generate, insert_checksum,
};

fn gender() -> impl Strategy<Value = Gender> {
  prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

fn record() -> impl Strategy<Value = IdentityRecord> {
  let first = NaiveDate::from_ymd_opt(calendar::MIN_YEAR, 1, 1).unwrap();
  let last = NaiveDate::from_ymd_opt(calendar::MAX_YEAR, 12, 31).unwrap();
  let span = (last - first).num_days();
  (gender(), 0..=span).prop_map(move |(g, offset)| {
    IdentityRecord::new(g, first + chrono::Duration::days(offset)).unwrap()
  })
}

// ─── Properties ──────────────────────────────────────────────────────────────

proptest! {
  #[test]
  fn decode_inverts_encode(record in record(), sequence in 0u16..=999) {
    let code = encode(&record, sequence).unwrap();
    prop_assert_eq!(decode(code.as_str()).unwrap(), record);
    prop_assert_eq!(code.sequence(), sequence);
    prop_assert_eq!(code.gender(), record.gender());
  }

  #[test]
  fn checksum_is_pure(base in "[0-9]{10}") {
    let first = checksum(&base).unwrap();
    prop_assert!(first <= 9);
    prop_assert_eq!(checksum(&base).unwrap(), first);
    prop_assert_eq!(
      insert_checksum(&base).unwrap(),
      format!("{base}{first}")
    );
  }

  #[test]
  fn any_wrong_final_digit_is_rejected(
    record in record(),
    sequence in 0u16..=999,
    bump in 1u8..=9,
  ) {
    let code = encode(&record, sequence).unwrap();
    let wrong = (code.checksum_digit() + bump) % 10;
    let tampered = format!("{}{wrong}", &code.as_str()[..10]);
    let err = decode(&tampered).unwrap_err();
    prop_assert_eq!(err.kind(), ErrorKind::Semantic);
  }
}

// ─── Fixed cases ─────────────────────────────────────────────────────────────

#[test]
fn documented_examples() {
  assert_eq!(checksum("5000101000").unwrap(), 6);

  assert_eq!(gender_marker(2000, Gender::Male).unwrap(), 5);
  assert_eq!(gender_marker(1800, Gender::Female).unwrap(), 2);
  assert_eq!(gender_marker(2100, Gender::Male).unwrap(), 7);

  assert!(calendar::exists(2000, 2, 29));
  assert!(!calendar::exists(2001, 2, 29));
  assert!(!calendar::exists(2000, 4, 31));
}

#[test]
fn boundary_rejection() {
  assert_eq!(decode("90001010006").unwrap_err().kind(), ErrorKind::Range);
  assert_eq!(decode("50001010000").unwrap_err().kind(), ErrorKind::Semantic);
  assert_eq!(decode("500010100060").unwrap_err().kind(), ErrorKind::Format);
}

#[test]
fn enumerator_matches_direct_construction() {
  let record = IdentityRecord::from_ymd(Gender::Male, 1968, 8, 21).unwrap();
  let from_generate = generate(
    &Constraints::new()
      .genders([Gender::Male])
      .days([21])
      .months([8])
      .years([1968]),
  )
  .unwrap();
  assert_eq!(from_generate, construct_all(&record).unwrap());
}

#[test]
fn construct_all_round_trips() {
  let record = IdentityRecord::from_ymd(Gender::Female, 2199, 12, 31).unwrap();
  let codes = construct_all(&record).unwrap();
  assert_eq!(codes.len(), 1000);
  assert!(codes.windows(2).all(|w| w[0] < w[1]));
  for code in &codes {
    let reparsed: IdentityCode = code.as_str().parse().unwrap();
    assert_eq!(reparsed.record(), &record);
    assert_eq!(reparsed.birthdate().year(), 2199);
  }
}

#[test]
fn construct_many_agrees_with_encode() {
  let record = IdentityRecord::from_ymd(Gender::Male, 1850, 6, 30).unwrap();
  let sequences = [500, 3, 999, 0];
  let many = construct_many(&record, &sequences).unwrap();
  for (code, &sequence) in many.iter().zip(&sequences) {
    assert_eq!(code, &encode(&record, sequence).unwrap());
  }
}
