//! Accident-Harvest main entry point
//!
//! This is the command-line interface for the accident harvester.

use accident_harvest::config::{read_config, validate, Config};
use accident_harvest::crawler::run_harvest;
use accident_harvest::output::print_statistics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Accident-Harvest: an incremental accident-record harvester
///
/// Walks the accident database year by year, extracts every accident
/// report, and appends the records to a CSV file in small batches. An
/// existing CSV file is appended to rather than replaced.
#[derive(Parser, Debug)]
#[command(name = "accident-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Incrementally harvest accident records to CSV", long_about = None)]
struct Cli {
    /// First year to harvest (default: 1919)
    #[arg(long, value_name = "YEAR")]
    start_year: Option<i32>,

    /// Last year to harvest (default: current year)
    #[arg(long, value_name = "YEAR")]
    end_year: Option<i32>,

    /// Path of the CSV store (default: aviation_accidents.csv)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    tracing::info!(
        "Harvesting {}..={} from {} into {}",
        config.crawler.start_year,
        config.crawler.end_year,
        config.crawler.base_url,
        config.output.csv_path
    );

    match run_harvest(&config).await {
        Ok(stats) => {
            tracing::info!("Harvest completed successfully");
            if !cli.quiet {
                print_statistics(&stats);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Loads the optional config file and applies command-line overrides
///
/// Validation runs once, on the merged result.
fn build_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            read_config(path)?
        }
        None => Config::default(),
    };

    if let Some(start_year) = cli.start_year {
        config.crawler.start_year = start_year;
    }
    if let Some(end_year) = cli.end_year {
        config.crawler.end_year = end_year;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.to_string_lossy().into_owned();
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("accident_harvest=info,warn"),
            1 => EnvFilter::new("accident_harvest=debug,info"),
            2 => EnvFilter::new("accident_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
