//! Scan command - replay a recorded capture through the full pipeline.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use kobo_scan_core::{FixedClock, ReplayScanner, ScanOrchestrator, ScanOutcome};

use super::{load_config, read_recording, reference_date, ModeArg};
use crate::sinks::companion_for;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Recorded SDK return value to replay
    #[arg(required = true)]
    input: PathBuf,

    /// Companion target: a directory, or an http(s) URL
    #[arg(long)]
    companion: String,

    /// Recognizer mode (default: from config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Reference date for age as YYYY-MM-DD (default: today)
    #[arg(long)]
    today: Option<String>,

    /// Refuse delivery when document number, name or birth date is empty
    #[arg(long)]
    require_fields: bool,

    /// Recognition SDK license key
    #[arg(long, env = "KOBO_SCAN_LICENSE_KEY", hide_env_values = true)]
    license_key: Option<String>,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(mode) = args.mode {
        config.capture.mode = mode.into();
    }
    if let Some(key) = args.license_key {
        config.capture.license_key = key;
    }

    let today = reference_date(args.today.as_deref())?;
    let scanner = ReplayScanner::from_value(read_recording(&args.input)?);
    let companion = companion_for(&args.companion, args.require_fields);

    info!("Scanning {} in {:?} mode", args.input.display(), config.capture.mode);
    debug!("Reference date {}", today);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Scanning and delivering...");

    let mut orchestrator = ScanOrchestrator::with_clock(scanner, companion, FixedClock(today), config);
    let outcome = orchestrator.scan().await;

    pb.finish_and_clear();

    match outcome {
        ScanOutcome::Succeeded { summary, records, .. } => {
            println!("{}", summary);
            println!();
            println!(
                "{} Delivered {} to {}",
                style("✓").green(),
                if records.len() > 1 { "first record" } else { "record" },
                args.companion
            );
            Ok(())
        }
        ScanOutcome::Empty { message } => {
            println!("{} {}", style("ℹ").blue(), message);
            Ok(())
        }
        ScanOutcome::Failed { message, detail, summary } => {
            if let Some(summary) = summary {
                println!("{}", summary);
                println!();
            }
            eprintln!("{} {}", style("✗").red(), message);
            anyhow::bail!("{}", detail)
        }
    }
}
