//! # fincheck CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fincheck_cli::figi::{run_figi, FigiArgs};
use fincheck_cli::loss::{run_max_loss, MaxLossArgs};
use fincheck_cli::{load_config, OutputFormat};
use fincheck_core::{CheckDigitPolicy, FigiValidator};

/// fincheck — financial identifier and price-series checks.
///
/// Validates FIGI strings with a per-check diagnostic report and computes
/// the maximum peak-to-trough loss of a price series.
#[derive(Parser, Debug)]
#[command(name = "fincheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Check digit policy (literal or reduced). Overrides the config file.
    #[arg(long, global = true)]
    check_digit: Option<CheckDigitPolicy>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate FIGI strings and report every check.
    Figi(FigiArgs),

    /// Maximum peak-to-trough loss of a price series.
    MaxLoss(MaxLossArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("fincheck CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Figi(args) => load_config(cli.config.as_deref()).and_then(|mut config| {
            if let Some(policy) = cli.check_digit {
                config.check_digit = policy;
            }
            run_figi(&args, &FigiValidator::new(config), cli.format)
        }),
        Commands::MaxLoss(args) => run_max_loss(&args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
