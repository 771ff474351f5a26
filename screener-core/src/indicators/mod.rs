//! Indicator library.
//!
//! Every function here is pure: a bar or price slice in, values out. Minimum
//! history requirements are reported as [`IndicatorError::InsufficientData`];
//! degenerate denominators resolve to 0 and never fail.
//!
//! Output sequences are ordered oldest → newest. Only [`PpoTriple`] flips to
//! most-recent-first, matching how the screening filters read the oscillator.
//!
//! [`IndicatorError::InsufficientData`]: crate::error::IndicatorError::InsufficientData

pub mod dmi;
pub mod ema;
pub mod hook;
pub mod ppo;
pub mod returns;
pub mod slope;
pub mod true_range;
pub mod wilder;

pub use dmi::{calculate_dmi, calculate_dmi_with_history, DmiHistory, DmiResult, DEFAULT_DMI_PERIOD};
pub use ema::ema;
pub use hook::{detect_hook, HookPattern};
pub use ppo::{calculate_ppo, PpoSeries, PpoTriple, DEFAULT_PPO_FAST, DEFAULT_PPO_SLOW};
pub use returns::{day_change_pct, returns, volume_stats, ReturnWindow, Returns, VolumeStats};
pub use slope::ppo_slope;
pub use true_range::{directional_movement, true_range, DirectionalMovement};
pub use wilder::wilder_smooth;

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples for testing.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<crate::domain::PriceBar> {
    use crate::domain::PriceBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| PriceBar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// The ten-bar OHLC fixture shared by the true range and DMI tests.
#[cfg(test)]
pub fn reference_bars() -> Vec<crate::domain::PriceBar> {
    make_ohlc_bars(&[
        (100.0, 105.0, 95.0, 102.0),
        (102.0, 108.0, 100.0, 106.0),
        (106.0, 107.0, 98.0, 99.0),
        (99.0, 103.0, 97.0, 101.0),
        (101.0, 106.0, 100.0, 105.0),
        (105.0, 110.0, 103.0, 108.0),
        (108.0, 112.0, 106.0, 110.0),
        (110.0, 111.0, 104.0, 105.0),
        (105.0, 109.0, 103.0, 107.0),
        (107.0, 113.0, 105.0, 112.0),
    ])
}
