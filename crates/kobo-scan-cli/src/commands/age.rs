//! Age command - compute age from a date of birth.

use clap::Args;
use tracing::warn;

use kobo_scan_core::{compute_age, parse_birth_date};

use super::reference_date;

/// Arguments for the age command.
#[derive(Args)]
pub struct AgeArgs {
    /// Date of birth (DD.MM.YYYY, DD/MM/YYYY, DD-MM-YYYY or YYMMDD)
    date_of_birth: String,

    /// Reference date as YYYY-MM-DD (default: today)
    #[arg(long)]
    today: Option<String>,
}

pub async fn run(args: AgeArgs) -> anyhow::Result<()> {
    let today = reference_date(args.today.as_deref())?;

    if parse_birth_date(&args.date_of_birth, today).is_none() {
        warn!("Unrecognized date of birth '{}', age defaults to 0", args.date_of_birth);
    }

    println!("{}", compute_age(&args.date_of_birth, today));

    Ok(())
}
