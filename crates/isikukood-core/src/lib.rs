//! Codec, validator and enumerator for Estonian personal identity codes
//! (*isikukood*).
//!
//! An identity code is eleven digits: a century/gender marker, the birth
//! date as `YYMMDD`, a three-digit sequence number, and a mod-11 check
//! digit. This crate converts between codes and [`IdentityRecord`]s,
//! computes check digits, and enumerates every code matching a set of
//! [`Constraints`]. Pure synchronous; no I/O.
//!
//! # Quick start
//!
//! ```
//! use isikukood_core::{Gender, IdentityRecord, decode, encode};
//!
//! let record = IdentityRecord::from_ymd(Gender::Female, 1987, 3, 14).unwrap();
//! let code = encode(&record, 27).unwrap();
//! assert_eq!(decode(code.as_str()).unwrap(), record);
//! ```

pub mod calendar;
pub mod checksum;
pub mod code;
pub mod codec;
pub mod enumerate;
pub mod error;
pub mod record;

pub use checksum::{checksum, insert_checksum};
pub use code::IdentityCode;
pub use codec::{
  assert_codec_consistency, construct_all, construct_many, decode, encode,
};
pub use enumerate::{Constraints, generate};
pub use error::{Error, ErrorKind, Result};
pub use record::{Gender, IdentityRecord, gender_marker};

#[cfg(test)]
mod tests;
