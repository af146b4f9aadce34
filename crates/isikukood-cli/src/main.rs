//! `isikukood` — validate, decode and generate Estonian identity codes.
//!
//! # Usage
//!
//! ```
//! isikukood decode 50001010006
//! isikukood encode --gender f --birthdate 1987-03-14 --sequence 27
//! isikukood generate --day 1 --month 1 --year 2000 --sequence 0,1,2
//! isikukood checksum 5000101000 --insert
//! ```

mod commands;
mod output;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use isikukood_core::Gender;
use output::OutputFormat;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "isikukood",
  version,
  about = "Validate, decode and generate Estonian identity codes"
)]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "isikukood.toml")]
  config: PathBuf,

  /// Output format; overrides the config file and ISIKUKOOD_FORMAT.
  #[arg(long, value_enum)]
  format: Option<OutputFormat>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Decode codes into gender, birth date and sequence number.
  Decode {
    #[arg(required = true)]
    codes: Vec<String>,
  },

  /// Report whether each code is valid; exits with status 1 if any is not.
  Validate {
    #[arg(required = true)]
    codes: Vec<String>,
  },

  /// Build codes for one person. Without --sequence, all 1000 are printed.
  Encode {
    /// m, f, male or female.
    #[arg(short, long)]
    gender: Gender,

    /// Birth date as YYYY-MM-DD.
    #[arg(short, long)]
    birthdate: NaiveDate,

    /// Sequence numbers (0-999), repeatable or comma-separated.
    #[arg(short, long, value_delimiter = ',')]
    sequence: Vec<u16>,
  },

  /// Print every valid code matching the filters, sorted.
  Generate {
    /// Genders to include (default: both).
    #[arg(short, long, value_delimiter = ',')]
    gender: Vec<Gender>,

    /// Days of the month (default: 1-31).
    #[arg(short, long, value_delimiter = ',')]
    day: Vec<u32>,

    /// Months (default: 1-12).
    #[arg(short, long, value_delimiter = ',')]
    month: Vec<u32>,

    /// Birth years (default: the current year).
    #[arg(short, long, value_delimiter = ',')]
    year: Vec<i32>,

    /// Sequence numbers (default: 0-999).
    #[arg(short, long, value_delimiter = ',')]
    sequence: Vec<u16>,
  },

  /// Compute the check digit of a 10- or 11-digit base.
  Checksum {
    base: String,

    /// Print the full code with the check digit in place instead.
    #[arg(long)]
    insert: bool,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> ExitCode {
  // Logs go to stderr so stdout stays machine-readable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  match run(Args::parse()) {
    Ok(code) => code,
    Err(e) => {
      eprintln!("error: {e:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(args: Args) -> Result<ExitCode> {
  let settings = settings::Settings::load(&args.config)?;
  let format = args.format.unwrap_or(settings.format);
  tracing::debug!(?format, command = ?args.command, "starting");

  let mut stdout = std::io::stdout().lock();
  commands::execute(args.command, format, &mut stdout)
}
