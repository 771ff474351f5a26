//! Wilder smoothing.
//!
//! Seed: mean of the first min(period, len) raw values.
//! Then smoothed[k] = (smoothed[k-1] * (period-1) + raw[k+period-1]) / period.
//!
//! Output length is `len - period + 1` when `len >= period`, otherwise 1.

/// Apply Wilder smoothing to a raw series.
///
/// Returns an empty vector for empty input or a zero period; callers validate
/// the period before getting here.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let seed_len = period.min(values.len());
    let seed = values[..seed_len].iter().sum::<f64>() / seed_len as f64;

    let mut result = Vec::with_capacity(values.len().saturating_sub(period) + 1);
    result.push(seed);

    let p = period as f64;
    let mut prev = seed;
    for &raw in values.iter().skip(period) {
        let smoothed = (prev * (p - 1.0) + raw) / p;
        result.push(smoothed);
        prev = smoothed;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn seed_then_recursive() {
        let tr = [8.0, 9.0, 6.0, 6.0, 7.0, 6.0, 7.0, 6.0, 8.0];
        let s = wilder_smooth(&tr, 3);
        assert_eq!(s.len(), 7);
        assert_approx(s[0], 23.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(s[1], 64.0 / 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_input_is_plain_mean() {
        let s = wilder_smooth(&[2.0, 4.0], 14);
        assert_eq!(s, vec![3.0]);
    }

    #[test]
    fn exact_period_length_yields_one_value() {
        let s = wilder_smooth(&[1.0, 2.0, 3.0], 3);
        assert_eq!(s, vec![2.0]);
    }

    #[test]
    fn period_one_is_identity() {
        let raw = [5.0, 1.0, 7.0];
        assert_eq!(wilder_smooth(&raw, 1), raw.to_vec());
    }

    #[test]
    fn empty_or_zero_period() {
        assert!(wilder_smooth(&[], 14).is_empty());
        assert!(wilder_smooth(&[1.0], 0).is_empty());
    }
}
