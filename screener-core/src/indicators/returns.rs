//! Descriptive statistics shown alongside the screened indicators:
//! horizon returns, the one-day change and volume averages.

use serde::{Deserialize, Serialize};

use crate::domain::PriceBar;

pub const WEEK_BARS: usize = 5;
pub const MONTH_BARS: usize = 21;
pub const QUARTER_BARS: usize = 63;
pub const HALF_YEAR_BARS: usize = 126;
pub const YEAR_BARS: usize = 252;

/// A percentage return over a look-back window.
///
/// `partial` is set when fewer bars than the nominal horizon were available
/// and the window was shortened to what exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnWindow {
    pub pct: f64,
    pub bars_used: usize,
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Returns {
    pub week: Option<ReturnWindow>,
    pub month: Option<ReturnWindow>,
    pub quarter: Option<ReturnWindow>,
    pub half_year: Option<ReturnWindow>,
    pub year: Option<ReturnWindow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeStats {
    pub latest: u64,
    pub average: f64,
    pub window: usize,
}

/// Returns over the standard horizons.
///
/// Horizons longer than the history are `None`, except the one-year figure,
/// which falls back to the longest available window and is marked partial.
pub fn returns(bars: &[PriceBar]) -> Returns {
    let year = window_return(bars, YEAR_BARS).or_else(|| {
        let available = bars.len().checked_sub(1).filter(|&n| n > 0)?;
        window_return(bars, available).map(|w| ReturnWindow {
            partial: true,
            ..w
        })
    });

    Returns {
        week: window_return(bars, WEEK_BARS),
        month: window_return(bars, MONTH_BARS),
        quarter: window_return(bars, QUARTER_BARS),
        half_year: window_return(bars, HALF_YEAR_BARS),
        year,
    }
}

/// Percentage change of the last close against the previous one.
pub fn day_change_pct(bars: &[PriceBar]) -> Option<f64> {
    window_return(bars, 1).map(|w| w.pct)
}

/// Latest volume and the mean over the last `min(window, len)` bars.
pub fn volume_stats(bars: &[PriceBar], window: usize) -> VolumeStats {
    let Some(last) = bars.last() else {
        return VolumeStats::default();
    };
    let n = window.max(1).min(bars.len());
    // A u64 sum overflows on large volumes.
    let total: f64 = bars[bars.len() - n..].iter().map(|b| b.volume as f64).sum();
    VolumeStats {
        latest: last.volume,
        average: total / n as f64,
        window: n,
    }
}

fn window_return(bars: &[PriceBar], horizon: usize) -> Option<ReturnWindow> {
    if horizon == 0 || bars.len() <= horizon {
        return None;
    }
    let last = bars[bars.len() - 1].close;
    let base = bars[bars.len() - 1 - horizon].close;
    if base == 0.0 {
        return None;
    }
    Some(ReturnWindow {
        pct: 100.0 * (last - base) / base,
        bars_used: horizon,
        partial: false,
    })
}
