//! DMI / ADX: Directional Movement Index (Wilder).
//!
//! Steps:
//! 1. True Range, +DM and -DM from consecutive bars
//! 2. Wilder-smooth TR, +DM and -DM with `period`
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR), 0 when smoothed(TR) is 0
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR), 0 when smoothed(TR) is 0
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI), 0 when the sum is 0
//! 6. ADX = Wilder-smoothed DX with the same period
//!
//! Requires `period + 1` bars. The screener's "current DMI" reading is the
//! latest ADX value.

use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;
use crate::error::IndicatorError;
use crate::indicators::true_range::{directional_movement, true_range};
use crate::indicators::wilder::wilder_smooth;

pub const DEFAULT_DMI_PERIOD: usize = 14;

/// DI+/DI-/ADX over time, aligned to the ADX timeline (oldest → newest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmiHistory {
    pub di_plus: Vec<f64>,
    pub di_minus: Vec<f64>,
    pub adx: Vec<f64>,
}

impl DmiHistory {
    pub fn len(&self) -> usize {
        self.adx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adx.is_empty()
    }
}

/// Latest smoothed DMI readings, each in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmiResult {
    pub di_plus: f64,
    pub di_minus: f64,
    pub adx: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<DmiHistory>,
}

impl DmiResult {
    /// The value the DMI filter compares against: the latest ADX.
    pub fn current_dmi(&self) -> f64 {
        self.adx
    }
}

/// Compute the latest DI+, DI- and ADX.
pub fn calculate_dmi(bars: &[PriceBar], period: usize) -> Result<DmiResult, IndicatorError> {
    let history = dmi_history(bars, period)?;
    Ok(latest(&history, false))
}

/// Same as [`calculate_dmi`] but keeps the full aligned history.
pub fn calculate_dmi_with_history(
    bars: &[PriceBar],
    period: usize,
) -> Result<DmiResult, IndicatorError> {
    let history = dmi_history(bars, period)?;
    Ok(latest(&history, true))
}

fn latest(history: &DmiHistory, keep: bool) -> DmiResult {
    // dmi_history never returns an empty timeline.
    let last = history.len() - 1;
    DmiResult {
        di_plus: history.di_plus[last],
        di_minus: history.di_minus[last],
        adx: history.adx[last],
        history: keep.then(|| history.clone()),
    }
}

fn dmi_history(bars: &[PriceBar], period: usize) -> Result<DmiHistory, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            name: "dmi",
            value: period,
        });
    }
    if bars.len() < period + 1 {
        return Err(IndicatorError::insufficient(period + 1, bars.len()));
    }

    let tr = true_range(bars)?;
    let dm = directional_movement(bars)?;

    let smooth_tr = wilder_smooth(&tr, period);
    let smooth_plus = wilder_smooth(&dm.plus, period);
    let smooth_minus = wilder_smooth(&dm.minus, period);

    let mut di_plus = Vec::with_capacity(smooth_tr.len());
    let mut di_minus = Vec::with_capacity(smooth_tr.len());
    let mut dx = Vec::with_capacity(smooth_tr.len());

    for ((&str_, &sp), &sm) in smooth_tr.iter().zip(&smooth_plus).zip(&smooth_minus) {
        let (plus, minus) = if str_ == 0.0 {
            (0.0, 0.0)
        } else {
            (100.0 * sp / str_, 100.0 * sm / str_)
        };
        let sum = plus + minus;
        dx.push(if sum == 0.0 {
            0.0
        } else {
            100.0 * (plus - minus).abs() / sum
        });
        di_plus.push(plus);
        di_minus.push(minus);
    }

    let adx = wilder_smooth(&dx, period);

    // Trim DI to the ADX timeline so every history column has the same length.
    let skip = di_plus.len() - adx.len();
    Ok(DmiHistory {
        di_plus: di_plus.split_off(skip),
        di_minus: di_minus.split_off(skip),
        adx,
    })
}
