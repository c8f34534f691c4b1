//! # Max-Loss Subcommand
//!
//! Computes the maximum peak-to-trough loss of a price series given in
//! date-ascending order.

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

use fincheck_core::{max_loss_detail, MaxLoss, ValidationError};

use crate::OutputFormat;

/// Arguments for the `fincheck max-loss` subcommand.
#[derive(Args, Debug)]
pub struct MaxLossArgs {
    /// Prices ordered by date ascending.
    #[arg(value_name = "PRICE", allow_hyphen_values = true)]
    pub prices: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MaxLossReport {
    loss: Decimal,
    detail: Option<MaxLoss>,
}

/// Execute the max-loss subcommand.
///
/// Returns exit code: 0 on success, 1 on an unparseable or negative price.
pub fn run_max_loss(args: &MaxLossArgs, format: OutputFormat) -> Result<u8> {
    let prices = match parse_prices(&args.prices) {
        Ok(prices) => prices,
        Err(e) => {
            println!("ERROR: {e}");
            return Ok(1);
        }
    };

    let detail = match max_loss_detail(&prices) {
        Ok(detail) => detail,
        Err(e @ ValidationError::NegativePrice { .. }) => {
            println!("ERROR: {e}");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    let report = MaxLossReport {
        loss: detail.map_or(Decimal::ZERO, |d| d.loss),
        detail,
    };

    match format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize max loss report")?;
            println!("{json}");
        }
    }
    Ok(0)
}

/// Parse decimal prices, naming the first argument that fails.
pub fn parse_prices(raw: &[String]) -> Result<Vec<Decimal>> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            Decimal::from_str(s.trim()).with_context(|| format!("price {i} is not a number: {s:?}"))
        })
        .collect()
}

fn render_text(report: &MaxLossReport) -> String {
    match &report.detail {
        Some(d) => format!(
            "Max loss: {} (buy at {} [#{}], sell at {} [#{}])\n",
            d.loss, d.peak, d.peak_index, d.trough, d.trough_index
        ),
        None => format!("Max loss: {}\n", report.loss),
    }
}
