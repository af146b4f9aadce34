//! Subcommand execution. Each command writes its result to `out` and returns
//! the process exit status.

use std::{io::Write, process::ExitCode};

use anyhow::{Context, Result};
use isikukood_core::{
  Constraints, IdentityCode, IdentityRecord, checksum, construct_all,
  construct_many, generate, insert_checksum,
};

use crate::{
  Command,
  output::{self, Decoded, OutputFormat, Verdict},
};

pub fn execute(
  command: Command,
  format: OutputFormat,
  out: &mut impl Write,
) -> Result<ExitCode> {
  match command {
    Command::Decode { codes } => {
      let rows = codes
        .iter()
        .map(|raw| {
          raw
            .parse::<IdentityCode>()
            .map(|code| Decoded::from(&code))
            .with_context(|| format!("cannot decode {raw}"))
        })
        .collect::<Result<Vec<_>>>()?;
      output::decoded(out, format, &rows)?;
    }

    Command::Validate { codes } => {
      let rows: Vec<Verdict> =
        codes.iter().map(String::as_str).map(verdict).collect();
      output::verdicts(out, format, &rows)?;
      if rows.iter().any(|r| !r.valid) {
        return Ok(ExitCode::FAILURE);
      }
    }

    Command::Encode {
      gender,
      birthdate,
      sequence,
    } => {
      let record = IdentityRecord::new(gender, birthdate)
        .with_context(|| {
          format!("invalid person: {gender}, born {birthdate}")
        })?;
      let codes = if sequence.is_empty() {
        construct_all(&record)?
      } else {
        construct_many(&record, &sequence)?
      };
      output::codes(out, format, &codes)?;
    }

    Command::Generate {
      gender,
      day,
      month,
      year,
      sequence,
    } => {
      let constraints = Constraints {
        genders:   non_empty(gender),
        days:      non_empty(day),
        months:    non_empty(month),
        years:     non_empty(year),
        sequences: non_empty(sequence),
      };
      let codes = generate(&constraints)?;
      tracing::info!(count = codes.len(), "generated identity codes");
      output::codes(out, format, &codes)?;
    }

    Command::Checksum { base, insert } => {
      let value = if insert {
        insert_checksum(&base)?
      } else {
        checksum(&base)?.to_string()
      };
      output::scalar(out, format, &value)?;
    }
  }

  Ok(ExitCode::SUCCESS)
}

fn verdict(raw: &str) -> Verdict {
  match raw.parse::<IdentityCode>() {
    Ok(_) => Verdict {
      code:  raw.to_string(),
      valid: true,
      kind:  None,
      error: None,
    },
    Err(e) => Verdict {
      code:  raw.to_string(),
      valid: false,
      kind:  Some(e.kind()),
      error: Some(e.to_string()),
    },
  }
}

/// An omitted repeatable flag means "use the default set".
fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
  (!values.is_empty()).then_some(values)
}
