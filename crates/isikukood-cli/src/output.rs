//! Rendering of command results as plain text or JSON.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use isikukood_core::{ErrorKind, Gender, IdentityCode};
use serde::{Deserialize, Serialize};

#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// One line per item.
  #[default]
  Text,
  /// A single JSON document.
  Json,
}

// ─── Row types ────────────────────────────────────────────────────────────────

/// One decoded code.
#[derive(Debug, Serialize)]
pub struct Decoded {
  pub code:      String,
  pub gender:    Gender,
  pub birthdate: String,
  pub sequence:  u16,
}

impl From<&IdentityCode> for Decoded {
  fn from(code: &IdentityCode) -> Self {
    Self {
      code:      code.to_string(),
      gender:    code.gender(),
      birthdate: code.birthdate().to_string(),
      sequence:  code.sequence(),
    }
  }
}

/// Outcome of validating one input string.
#[derive(Debug, Serialize)]
pub struct Verdict {
  pub code:  String,
  pub valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub kind:  Option<ErrorKind>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

// ─── Writers ──────────────────────────────────────────────────────────────────

pub fn decoded(
  out: &mut impl Write,
  format: OutputFormat,
  rows: &[Decoded],
) -> Result<()> {
  match format {
    OutputFormat::Json => json(out, rows),
    OutputFormat::Text => {
      for row in rows {
        writeln!(
          out,
          "{}  {:<6}  {}  {:03}",
          row.code, row.gender, row.birthdate, row.sequence
        )?;
      }
      Ok(())
    }
  }
}

pub fn verdicts(
  out: &mut impl Write,
  format: OutputFormat,
  rows: &[Verdict],
) -> Result<()> {
  match format {
    OutputFormat::Json => json(out, rows),
    OutputFormat::Text => {
      for row in rows {
        match (&row.kind, &row.error) {
          (Some(kind), Some(error)) => {
            writeln!(out, "{}  invalid ({kind}): {error}", row.code)?
          }
          _ => writeln!(out, "{}  valid", row.code)?,
        }
      }
      Ok(())
    }
  }
}

pub fn codes(
  out: &mut impl Write,
  format: OutputFormat,
  codes: &[IdentityCode],
) -> Result<()> {
  match format {
    OutputFormat::Json => json(out, codes),
    OutputFormat::Text => {
      for code in codes {
        writeln!(out, "{code}")?;
      }
      Ok(())
    }
  }
}

/// A single scalar: a check digit or a code with its check digit inserted.
pub fn scalar(
  out: &mut impl Write,
  format: OutputFormat,
  value: &str,
) -> Result<()> {
  match format {
    OutputFormat::Json => json(out, &value),
    OutputFormat::Text => Ok(writeln!(out, "{value}")?),
  }
}

fn json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
  serde_json::to_writer_pretty(&mut *out, value)?;
  writeln!(out)?;
  Ok(())
}
