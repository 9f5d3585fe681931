//! Config command - inspect and edit the scan configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use kobo_scan_core::ScanConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Get a configuration value by dotted key
    Get {
        /// Configuration key (e.g., "delivery.retry_delay_ms")
        key: String,
    },

    /// Set a configuration value by dotted key
    Set {
        /// Configuration key
        key: String,
        /// New value (parsed as JSON, else taken as a string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show(&path),
        ConfigCommand::Init { output, force } => init(&output.unwrap_or(path), force),
        ConfigCommand::Get { key } => get(&path, &key),
        ConfigCommand::Set { key, value } => set(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("koboscan")
        .join("config.json")
}

fn load_or_default(path: &Path) -> anyhow::Result<ScanConfig> {
    if path.exists() {
        Ok(ScanConfig::from_file(path)?)
    } else {
        Ok(ScanConfig::default())
    }
}

fn show(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    ScanConfig::default().save(path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

fn get(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;
    let value = lookup_key(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn set(path: &Path, key: &str, raw_value: &str) -> anyhow::Result<()> {
    let value: Value =
        serde_json::from_str(raw_value).unwrap_or_else(|_| Value::String(raw_value.to_string()));

    let mut json = serde_json::to_value(load_or_default(path)?)?;
    assign_key(&mut json, key, value.clone())?;

    let config: ScanConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?
    );
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'koboscan config init' to create a configuration file.");
    }
    Ok(())
}

fn lookup_key<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

/// Replace the value at an existing dotted key.
fn assign_key(json: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent_key, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let parent = match parent_key {
        Some(parent_key) => parent_key
            .split('.')
            .try_fold(&mut *json, |current, part| current.get_mut(part)),
        None => Some(json),
    }
    .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;

    let object = parent
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path: {}", key))?;
    if !object.contains_key(leaf) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(leaf.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_key() {
        let json = serde_json::to_value(ScanConfig::default()).unwrap();

        assert_eq!(lookup_key(&json, "delivery.max_attempts"), Some(&json!(3)));
        assert_eq!(
            lookup_key(&json, "messages.labels.full_name"),
            Some(&json!("Full Name"))
        );
        assert_eq!(lookup_key(&json, "delivery.nope"), None);
    }

    #[test]
    fn test_assign_key() {
        let mut json = serde_json::to_value(ScanConfig::default()).unwrap();

        assign_key(&mut json, "extraction.back_only", json!("accept")).unwrap();
        let config: ScanConfig = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(config.extraction.back_only, kobo_scan_core::BackOnlyPolicy::Accept);

        assert!(assign_key(&mut json, "delivery.typo", json!(1)).is_err());
        assert!(assign_key(&mut json, "missing.section", json!(1)).is_err());
        assert!(assign_key(&mut json, "delivery.max_attempts.deeper", json!(1)).is_err());
    }

    #[test]
    fn test_set_then_get_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        set(&path, "delivery.retry_delay_ms", "0").unwrap();

        let config = ScanConfig::from_file(&path).unwrap();
        assert_eq!(config.delivery.retry_delay_ms, 0);
        assert!(set(&path, "delivery.max_attempts", "0").is_err());
    }
}
