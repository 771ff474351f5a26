//! Exponential Moving Average (EMA).
//!
//! Seed: mean of the first min(period, len) values.
//! Recursive: EMA[i] = price[i] * k + EMA[i-1] * (1 - k), k = 2 / (period + 1).
//!
//! Output index `j` corresponds to input index `j + period - 1`, so the output
//! holds `len - period + 1` values (one value when `len < period`).

use crate::error::IndicatorError;

/// Compute the EMA of a price sequence.
pub fn ema(values: &[f64], period: usize) -> Result<Vec<f64>, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "ema",
            value: period,
        });
    }
    if values.is_empty() {
        return Err(IndicatorError::insufficient(1, 0));
    }

    let seed_len = period.min(values.len());
    let seed = values[..seed_len].iter().sum::<f64>() / seed_len as f64;
    let k = 2.0 / (period as f64 + 1.0);

    let mut result = Vec::with_capacity(values.len().saturating_sub(period) + 1);
    result.push(seed);

    let mut prev = seed;
    for &price in values.iter().skip(period) {
        let next = price * k + prev * (1.0 - k);
        result.push(next);
        prev = next;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn period_1_equals_input() {
        let result = ema(&[100.0, 200.0, 300.0], 1).unwrap();
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn known_values_period_3() {
        // k = 0.5, seed = SMA(10, 11, 12) = 11
        // 0.5*13 + 0.5*11 = 12, 0.5*14 + 0.5*12 = 13
        let result = ema(&[10.0, 11.0, 12.0, 13.0, 14.0], 3).unwrap();
        assert_eq!(result.len(), 3);
        assert_approx(result[0], 11.0, DEFAULT_EPSILON);
        assert_approx(result[1], 12.0, DEFAULT_EPSILON);
        assert_approx(result[2], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_input_seeds_with_available_mean() {
        let result = ema(&[10.0, 20.0], 5).unwrap();
        assert_eq!(result, vec![15.0]);
    }

    #[test]
    fn empty_and_zero_period() {
        assert_eq!(
            ema(&[], 3),
            Err(IndicatorError::InsufficientData {
                required: 1,
                available: 0
            })
        );
        assert!(matches!(
            ema(&[1.0], 0),
            Err(IndicatorError::InvalidPeriod { name: "ema", .. })
        ));
    }

    #[test]
    fn rising_prices_fast_above_slow() {
        let prices: Vec<f64> = (0..40).map(|i| 50.0 + i as f64).collect();
        let fast = ema(&prices, 5).unwrap();
        let slow = ema(&prices, 10).unwrap();
        // Align on the last input index
        assert!(fast.last().unwrap() > slow.last().unwrap());
    }
}
