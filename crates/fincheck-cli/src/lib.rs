//! # fincheck-cli — Command-Line Interface for fincheck
//!
//! Provides the `fincheck` binary.
//!
//! ## Subcommands
//!
//! - `fincheck figi` — Validate FIGI strings with a per-check report.
//! - `fincheck max-loss` — Maximum peak-to-trough loss of a price series.
//!
//! ```bash
//! fincheck figi BBG000BLNQ16 NRG92C84SB38
//! fincheck --format json figi --stdin < identifiers.txt
//! fincheck --config fincheck.yaml figi BBG000BLNQ70
//! fincheck max-loss 1 2 3 7 6 5 1 9 7 5 8
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every check lives in `fincheck-core`.
//! - Handlers return an exit code: 0 success, 1 rejected input,
//!   2 operational error.

pub mod figi;
pub mod loss;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use fincheck_core::ValidatorConfig;

/// Output rendering for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

/// Load the validator configuration, falling back to defaults when no
/// path is given.
pub fn load_config(path: Option<&Path>) -> Result<ValidatorConfig> {
    match path {
        Some(path) => ValidatorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ValidatorConfig::default()),
    }
}
