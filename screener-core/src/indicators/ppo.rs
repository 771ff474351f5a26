//! PPO: Percentage Price Oscillator.
//!
//! PPO = 100 * (fastEMA - slowEMA) / slowEMA
//!
//! The fast and slow EMA outputs live in different index spaces (each starts
//! at its own `period - 1`). Slow index `i` pairs with fast index
//! `i + (slow - fast)`; both then refer to the same input bar. Pairs where the
//! slow EMA is exactly 0 or the fast index falls outside the fast series are
//! skipped, not emitted as 0.

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;
use crate::indicators::ema::ema;
use crate::indicators::hook::{classify_hook, HookPattern};
use crate::indicators::slope::slope_of;

pub const DEFAULT_PPO_FAST: usize = 12;
pub const DEFAULT_PPO_SLOW: usize = 26;

/// PPO readings, oldest → newest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PpoSeries {
    pub values: Vec<f64>,
}

impl PpoSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// The last `n` readings, most recent first.
    pub fn recent(&self, n: usize) -> Vec<f64> {
        self.values.iter().rev().take(n).copied().collect()
    }

    /// The last three readings as a most-recent-first triple.
    pub fn latest_three(&self) -> Result<PpoTriple, IndicatorError> {
        PpoTriple::from_recent(&self.recent(3))
    }
}

/// Three PPO readings, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PpoTriple {
    pub today: f64,
    pub yesterday: f64,
    pub day_before: f64,
}

impl PpoTriple {
    pub fn new(today: f64, yesterday: f64, day_before: f64) -> Self {
        Self {
            today,
            yesterday,
            day_before,
        }
    }

    /// Build from a most-recent-first slice; needs at least 3 values.
    pub fn from_recent(recent: &[f64]) -> Result<Self, IndicatorError> {
        match recent {
            [today, yesterday, day_before, ..] => Ok(Self::new(*today, *yesterday, *day_before)),
            _ => Err(IndicatorError::insufficient(3, recent.len())),
        }
    }

    pub fn slope(&self) -> f64 {
        slope_of(self.today, self.yesterday)
    }

    pub fn hook(&self) -> HookPattern {
        classify_hook(self.today, self.yesterday, self.day_before)
    }
}

/// Compute the PPO series from close prices.
///
/// Fails with `InsufficientData` when fewer than `slow` prices are available.
pub fn calculate_ppo(closes: &[f64], fast: usize, slow: usize) -> Result<PpoSeries, IndicatorError> {
    if fast == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "ppo fast",
            value: fast,
        });
    }
    if slow == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "ppo slow",
            value: slow,
        });
    }
    if closes.len() < slow {
        return Err(IndicatorError::insufficient(slow, closes.len()));
    }

    let fast_ema = ema(closes, fast)?;
    let slow_ema = ema(closes, slow)?;

    let values = slow_ema
        .iter()
        .enumerate()
        .filter_map(|(i, &s)| {
            if s == 0.0 {
                return None;
            }
            let aligned = (i + slow).checked_sub(fast)?;
            let f = fast_ema.get(aligned)?;
            Some(100.0 * (f - s) / s)
        })
        .collect();

    Ok(PpoSeries { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    const CLOSES: [f64; 10] = [10.0, 11.0, 12.0, 13.0, 14.0, 13.0, 12.0, 13.0, 15.0, 16.0];

    #[test]
    fn known_values_fast_3_slow_5() {
        // fast EMA(3): [11, 12, 13, 13, 12.5, 12.75, 13.875, 14.9375]
        // slow EMA(5): [12, 12.333.., 12.222.., 12.481.., 13.320.., 14.213..]
        // offset = 2 → first pair is (13, 12) → 100 * 1 / 12
        let ppo = calculate_ppo(&CLOSES, 3, 5).unwrap();
        assert_eq!(ppo.len(), 6);
        assert_approx(ppo.values[0], 100.0 / 12.0, DEFAULT_EPSILON);
        assert_approx(ppo.values[1], 5.405405405405416, 1e-9);
        assert_approx(ppo.values[2], 2.2727272727272645, 1e-9);
        assert_approx(ppo.values[5], 5.090112912565126, 1e-9);
    }

    #[test]
    fn latest_three_is_most_recent_first() {
        let ppo = calculate_ppo(&CLOSES, 3, 5).unwrap();
        let triple = ppo.latest_three().unwrap();
        assert_approx(triple.today, 5.090112912565126, 1e-9);
        assert_approx(triple.yesterday, 4.1589434661723566, 1e-9);
        assert_approx(triple.day_before, 2.1513353115726757, 1e-9);
        assert_eq!(ppo.latest(), Some(triple.today));
    }

    #[test]
    fn exact_slow_length_yields_one_value() {
        let ppo = calculate_ppo(&CLOSES[..5], 3, 5).unwrap();
        assert_eq!(ppo.len(), 1);
        assert_approx(ppo.values[0], 100.0 / 12.0, DEFAULT_EPSILON);
        assert!(matches!(
            ppo.latest_three(),
            Err(IndicatorError::InsufficientData {
                required: 3,
                available: 1
            })
        ));
    }

    #[test]
    fn insufficient_prices() {
        let closes = vec![100.0; 25];
        assert_eq!(
            calculate_ppo(&closes, DEFAULT_PPO_FAST, DEFAULT_PPO_SLOW),
            Err(IndicatorError::InsufficientData {
                required: 26,
                available: 25
            })
        );
    }

    #[test]
    fn zero_slow_ema_is_skipped() {
        let mut closes = vec![0.0; 6];
        closes.push(6.0);
        // slow EMA(5): [0, 0, 2]; fast EMA(3): [0, 0, 0, 0, 3]
        let ppo = calculate_ppo(&closes, 3, 5).unwrap();
        assert_eq!(ppo.len(), 1);
        assert_approx(ppo.values[0], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn fast_longer_than_slow_skips_unaligned() {
        // offset is negative: the first slow indices have no fast partner
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let ppo = calculate_ppo(&closes, 5, 3).unwrap();
        assert_eq!(ppo.len(), 6);
    }

    #[test]
    fn constant_prices_are_zero() {
        let ppo = calculate_ppo(&[42.0; 40], 12, 26).unwrap();
        assert!(ppo.values.iter().all(|&v| v.abs() < DEFAULT_EPSILON));
    }

    #[test]
    fn rising_prices_keep_fast_above_slow() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let ppo = calculate_ppo(&closes, 12, 26).unwrap();
        assert!(ppo.values.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn accelerating_prices_non_decreasing() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i * i) as f64 * 0.05).collect();
        let ppo = calculate_ppo(&closes, 12, 26).unwrap();
        for w in ppo.values.windows(2) {
            assert!(w[1] >= w[0] - 1e-12, "PPO fell during acceleration: {w:?}");
        }
    }

    #[test]
    fn triple_needs_three_values() {
        assert!(PpoTriple::from_recent(&[1.0, 2.0]).is_err());
        let t = PpoTriple::from_recent(&[3.0, 2.0, 1.0, 0.0]).unwrap();
        assert_eq!(t, PpoTriple::new(3.0, 2.0, 1.0));
    }
}
