//! Layered configuration: optional TOML file, then `ISIKUKOOD_*`
//! environment variables. Command-line flags are applied by the caller.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::output::OutputFormat;

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub format: OutputFormat,
}

impl Settings {
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ISIKUKOOD"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings =
      Settings::load(Path::new("does-not-exist/isikukood.toml")).unwrap();
    assert_eq!(settings.format, OutputFormat::Text);
  }

  #[test]
  fn reads_format_from_file() {
    let dir = std::env::temp_dir().join(format!(
      "isikukood-settings-{}",
      std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("isikukood.toml");
    std::fs::write(&path, "format = \"json\"\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.format, OutputFormat::Json);

    std::fs::remove_dir_all(&dir).ok();
  }
}
