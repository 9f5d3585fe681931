//! Subcommands and the helpers they share.

pub mod age;
pub mod batch;
pub mod config;
pub mod normalize;
pub mod scan;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use kobo_scan_core::{ScanConfig, ScanMode};

/// Recognizer mode on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ModeArg {
    /// Front and back of the document
    Multi,
    /// Front only
    Single,
}

impl From<ModeArg> for ScanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Multi => ScanMode::MultiSide,
            ModeArg::Single => ScanMode::SingleSide,
        }
    }
}

/// Load `--config` if given, else the default config file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ScanConfig> {
    let config = match config_path {
        Some(path) => ScanConfig::from_file(Path::new(path))?,
        None => {
            let default_path = config::default_config_path();
            if default_path.exists() {
                debug!("Using config at {}", default_path.display());
                ScanConfig::from_file(&default_path)?
            } else {
                ScanConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Read a recorded SDK return value.
pub fn read_recording(path: &Path) -> anyhow::Result<Value> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", path.display(), e))?;
    Ok(value)
}

/// Split a recording into individual raw results.
pub fn raw_results(recording: Value) -> Vec<Value> {
    match recording {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Parse `--today`, defaulting to the local date.
pub fn reference_date(today: Option<&str>) -> anyhow::Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid --today '{}' (expected YYYY-MM-DD): {}", s, e)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_results() {
        assert!(raw_results(Value::Null).is_empty());
        assert_eq!(raw_results(json!({ "a": 1 })).len(), 1);
        assert_eq!(raw_results(json!([1, 2])).len(), 2);
    }

    #[test]
    fn test_reference_date() {
        assert_eq!(
            reference_date(Some("2024-06-20")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
        );
        assert!(reference_date(Some("20.06.2024")).is_err());
    }
}
