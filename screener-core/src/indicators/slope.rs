//! PPO slope: movement of the oscillator relative to the zero line.
//!
//! today <= 0: slope = 100 * (today - yesterday) / |yesterday|
//! today >  0: slope = 100 * (yesterday - today) / |yesterday|
//! yesterday == 0: slope = 0
//!
//! The sign convention flips with the side of zero the oscillator sits on.
//! Do not collapse this into a plain relative change.

use crate::error::IndicatorError;
use crate::indicators::ppo::PpoTriple;

/// Slope from the three most recent PPO values (most recent first).
pub fn ppo_slope(recent: &[f64]) -> Result<f64, IndicatorError> {
    PpoTriple::from_recent(recent).map(|t| t.slope())
}

pub(crate) fn slope_of(today: f64, yesterday: f64) -> f64 {
    if yesterday == 0.0 {
        return 0.0;
    }
    let base = yesterday.abs();
    if today > 0.0 {
        100.0 * (yesterday - today) / base
    } else {
        100.0 * (today - yesterday) / base
    }
}
