//! # FIGI Subcommand
//!
//! Validates one or more identifiers and reports every check for each.
//!
//! Text output, one block per identifier:
//!
//! ```text
//! ID: NRG92C84SB38
//!   Provider        PASS  provider prefix "NR" is not reserved
//!   Is Global       PASS  char 3 is 'G'
//!   Associations    PASS  chars 4-11 are digits or consonants
//!   Encoding        FAIL  check digit 8 does not match computed 9
//! ID is FIGI: false
//! ```

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::Args;

use fincheck_core::{FigiValidator, ValidationOutcome};

use crate::OutputFormat;

/// Arguments for the `fincheck figi` subcommand.
#[derive(Args, Debug)]
pub struct FigiArgs {
    /// Identifiers to validate.
    #[arg(value_name = "ID")]
    pub identifiers: Vec<String>,

    /// Also read identifiers from stdin, one per line.
    #[arg(long)]
    pub stdin: bool,
}

/// Execute the figi subcommand.
///
/// Returns exit code: 0 if every identifier is valid, 1 otherwise.
pub fn run_figi(args: &FigiArgs, validator: &FigiValidator, format: OutputFormat) -> Result<u8> {
    let mut identifiers = args.identifiers.clone();
    if args.stdin {
        let stdin = std::io::stdin();
        identifiers.extend(read_identifiers(stdin.lock())?);
    }

    if identifiers.is_empty() {
        println!("Usage: fincheck figi [--stdin] <ID>...");
        return Ok(1);
    }

    let outcomes: Vec<ValidationOutcome> = identifiers
        .iter()
        .map(|id| validator.validate(id))
        .collect();

    let invalid = outcomes.iter().filter(|o| !o.is_valid).count();
    tracing::info!(
        total = outcomes.len(),
        invalid,
        check_digit = %validator.config().check_digit,
        "validated identifiers"
    );

    match format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                print!("{}", render_text(outcome));
            }
            if outcomes.len() > 1 {
                println!("{}/{} valid", outcomes.len() - invalid, outcomes.len());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcomes)
                .context("failed to serialize validation outcomes")?;
            println!("{json}");
        }
    }

    Ok(exit_code(&outcomes))
}

/// Read identifiers one per line, skipping blank lines.
///
/// Lines are trimmed of surrounding whitespace only; no case folding.
pub fn read_identifiers(reader: impl BufRead) -> Result<Vec<String>> {
    let mut identifiers = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read identifier")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            identifiers.push(trimmed.to_string());
        }
    }
    Ok(identifiers)
}

/// Render one outcome as a text block.
pub fn render_text(outcome: &ValidationOutcome) -> String {
    let mut out = format!("ID: {}\n", outcome.identifier);
    for result in &outcome.checks {
        let status = if result.passed { "PASS" } else { "FAIL" };
        out.push_str(&format!(
            "  {:<16}{:<6}{}\n",
            result.check.name(),
            status,
            result.reason
        ));
    }
    out.push_str(&format!("ID is FIGI: {}\n", outcome.is_valid));
    out
}

fn exit_code(outcomes: &[ValidationOutcome]) -> u8 {
    if outcomes.iter().all(|o| o.is_valid) {
        0
    } else {
        1
    }
}
