//! True Range and Directional Movement.
//!
//! TR[i] = max(high[i]-low[i], |high[i]-close[i-1]|, |low[i]-close[i-1]|)
//! up = high[i]-high[i-1], down = low[i-1]-low[i]
//! +DM = up when up > down and up > 0, else 0; -DM symmetric.
//!
//! Both series start at bar 1, so an N-bar input yields N-1 values.

use crate::domain::PriceBar;
use crate::error::IndicatorError;

/// Parallel +DM / -DM sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalMovement {
    pub plus: Vec<f64>,
    pub minus: Vec<f64>,
}

/// Compute the True Range series. Requires at least 2 bars.
pub fn true_range(bars: &[PriceBar]) -> Result<Vec<f64>, IndicatorError> {
    if bars.len() < 2 {
        return Err(IndicatorError::insufficient(2, bars.len()));
    }

    Ok(bars
        .windows(2)
        .map(|w| {
            let (prev, cur) = (&w[0], &w[1]);
            (cur.high - cur.low)
                .max((cur.high - prev.close).abs())
                .max((cur.low - prev.close).abs())
        })
        .collect())
}

/// Compute +DM and -DM. Requires at least 2 bars.
///
/// An exact tie between the up and down move counts as no direction: both
/// sides are 0 for that bar.
pub fn directional_movement(bars: &[PriceBar]) -> Result<DirectionalMovement, IndicatorError> {
    if bars.len() < 2 {
        return Err(IndicatorError::insufficient(2, bars.len()));
    }

    let n = bars.len() - 1;
    let mut plus = Vec::with_capacity(n);
    let mut minus = Vec::with_capacity(n);

    for w in bars.windows(2) {
        let up_move = w[1].high - w[0].high;
        let down_move = w[0].low - w[1].low;

        plus.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });
    }

    Ok(DirectionalMovement { plus, minus })
}
