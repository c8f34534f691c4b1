//! # Maximum Loss
//!
//! Largest peak-to-trough decline over a price series ordered by date
//! ascending: the worst outcome of buying at a running high and selling at
//! any later price.
//!
//! Single pass, O(1) extra space. Prices are `Decimal` so that the loss is
//! exact for quoted prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The worst peak-to-trough decline found in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxLoss {
    /// `peak - trough`. Always positive.
    pub loss: Decimal,
    /// Buy price.
    pub peak: Decimal,
    /// Position of the peak in the series.
    pub peak_index: usize,
    /// Sell price.
    pub trough: Decimal,
    /// Position of the trough in the series. Always after `peak_index`.
    pub trough_index: usize,
}

/// Maximum loss over `prices`, zero when the series never declines.
///
/// # Errors
///
/// Returns [`ValidationError::NegativePrice`] on the first negative price.
pub fn max_loss(prices: &[Decimal]) -> Result<Decimal, ValidationError> {
    Ok(max_loss_detail(prices)?.map_or(Decimal::ZERO, |m| m.loss))
}

/// Maximum loss over `prices` with the peak and trough that produced it.
///
/// Returns `Ok(None)` for an empty or never-declining series. Among equal
/// losses the earliest is reported.
///
/// # Errors
///
/// Returns [`ValidationError::NegativePrice`] on the first negative price.
pub fn max_loss_detail(prices: &[Decimal]) -> Result<Option<MaxLoss>, ValidationError> {
    let mut peak: Option<(usize, Decimal)> = None;
    let mut worst: Option<MaxLoss> = None;

    for (index, &price) in prices.iter().enumerate() {
        if price < Decimal::ZERO {
            return Err(ValidationError::NegativePrice { index, price });
        }
        match peak {
            Some((peak_index, peak_price)) if price <= peak_price => {
                let loss = peak_price - price;
                if loss > worst.map_or(Decimal::ZERO, |w| w.loss) {
                    worst = Some(MaxLoss {
                        loss,
                        peak: peak_price,
                        peak_index,
                        trough: price,
                        trough_index: index,
                    });
                }
            }
            _ => peak = Some((index, price)),
        }
    }

    tracing::debug!(
        prices = prices.len(),
        loss = %worst.map_or(Decimal::ZERO, |w| w.loss),
        "computed max loss"
    );
    Ok(worst)
}
