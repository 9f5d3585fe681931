//! CLI host for identity document scan normalization and companion delivery.

mod commands;
mod sinks;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{age, batch, config, normalize, scan};

/// Kobo scan - Normalize identity document scans and hand them to KoboCollect
#[derive(Parser)]
#[command(name = "koboscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a recorded recognizer result file
    Normalize(normalize::NormalizeArgs),

    /// Run a full scan from a recorded result and deliver it
    Scan(scan::ScanArgs),

    /// Compute age from a date of birth
    Age(age::AgeArgs),

    /// Normalize multiple recorded result files
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Normalize(args) => normalize::run(args, cli.config.as_deref()).await,
        Commands::Scan(args) => scan::run(args, cli.config.as_deref()).await,
        Commands::Age(args) => age::run(args).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
