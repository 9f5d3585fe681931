//! Normalize command - turn a recorded recognizer result into scan records.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use kobo_scan_core::{format_summary, Normalizer, ScanConfig, ScanRecord};

use super::{load_config, raw_results, read_recording, ModeArg};

/// Arguments for the normalize command.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Recorded SDK result (JSON object or array)
    #[arg(required = true)]
    input: PathBuf,

    /// Recognizer mode (default: from config)
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// One CSV row per record
    Csv,
    /// Labeled summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: NormalizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mode = args.mode.map(Into::into).unwrap_or(config.capture.mode);

    info!("Normalizing {}", args.input.display());

    let raws = raw_results(read_recording(&args.input)?);
    let records = Normalizer::from_config(&config, mode).normalize_all(&raws);
    debug!("{} of {} results usable", records.len(), raws.len());

    if records.is_empty() {
        anyhow::bail!("{}", config.messages.card_not_supported);
    }

    let output = format_records(&records, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

pub fn format_records(
    records: &[ScanRecord],
    format: OutputFormat,
    config: &ScanConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_summary(records, &config.messages.labels)),
    }
}

fn format_csv(records: &[ScanRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "full_name",
        "date_of_birth",
        "document_number",
        "fathers_name",
        "address",
        "province",
        "district",
        "village",
        "sex",
        "date_of_issue",
        "document_additional_number",
        "date_of_expiry",
        "dependents_info",
    ])?;

    for record in records {
        let front = &record.front;
        let back = &record.back;
        wtr.write_record([
            &front.full_name,
            &front.date_of_birth,
            &front.document_number,
            &front.fathers_name,
            &front.address,
            &front.province,
            &front.district,
            &front.village,
            &front.sex,
            &back.date_of_issue,
            &back.document_additional_number,
            &back.date_of_expiry,
            &record.dependents_info,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kobo_scan_core::NormalizedFrontFields;

    #[test]
    fn test_format_csv() {
        let record = ScanRecord {
            front: NormalizedFrontFields {
                full_name: "AHMAD, KARIMI".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let csv = format_csv(&[record]).unwrap();
        let mut lines = csv.lines();

        assert!(lines.next().unwrap().starts_with("full_name,date_of_birth"));
        assert!(lines.next().unwrap().starts_with("\"AHMAD, KARIMI\","));
        assert!(lines.next().is_none());
    }
}
