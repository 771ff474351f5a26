//! ScreenedInstrument assembly.
//!
//! A record is built once per instrument per scan from its price series and
//! static metadata. Any indicator failure surfaces as an `IndicatorError` so
//! the pipeline can exclude the instrument.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use screener_core::domain::{InstrumentMeta, OptionQuote, PriceSeries};
use screener_core::indicators::{
    calculate_dmi, calculate_dmi_with_history, calculate_ppo, day_change_pct, returns,
    volume_stats, DmiResult, HookPattern, PpoTriple, Returns, VolumeStats, DEFAULT_DMI_PERIOD,
    DEFAULT_PPO_FAST, DEFAULT_PPO_SLOW,
};
use screener_core::IndicatorError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("invalid indicator parameter '{field}': {reason}")]
    InvalidParams { field: &'static str, reason: String },
}

/// Indicator periods and record options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub dmi_period: usize,
    pub ppo_fast: usize,
    pub ppo_slow: usize,
    pub include_dmi_history: bool,
    pub volume_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            dmi_period: DEFAULT_DMI_PERIOD,
            ppo_fast: DEFAULT_PPO_FAST,
            ppo_slow: DEFAULT_PPO_SLOW,
            include_dmi_history: false,
            volume_window: 20,
        }
    }
}

impl IndicatorParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let check = |field: &'static str, value: usize| {
            if value == 0 {
                Err(ParamsError::InvalidParams {
                    field,
                    reason: "must be at least 1".into(),
                })
            } else {
                Ok(())
            }
        };
        check("dmi_period", self.dmi_period)?;
        check("ppo_fast", self.ppo_fast)?;
        check("ppo_slow", self.ppo_slow)?;
        check("volume_window", self.volume_window)?;
        if self.ppo_fast >= self.ppo_slow {
            return Err(ParamsError::InvalidParams {
                field: "ppo_fast",
                reason: format!(
                    "fast period ({}) must be shorter than slow period ({})",
                    self.ppo_fast, self.ppo_slow
                ),
            });
        }
        Ok(())
    }

    /// Bars needed for every indicator to produce a record:
    /// DMI needs `period + 1`, three PPO readings need `slow + 2`.
    pub fn min_bars(&self) -> usize {
        (self.dmi_period + 1).max(self.ppo_slow + 2)
    }
}

/// The read-only result record for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenedInstrument {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    /// Date of the last bar the indicators were computed on.
    pub as_of: NaiveDate,
    /// Latest close.
    pub price: f64,
    pub day_change_pct: Option<f64>,
    pub dmi: DmiResult,
    /// Latest three PPO readings, most recent first.
    pub ppo: PpoTriple,
    pub ppo_slope: f64,
    pub ppo_hook: HookPattern,
    pub returns: Returns,
    pub volume: VolumeStats,
    pub optionable: bool,
    pub next_earnings: Option<NaiveDate>,
    pub option_quote: Option<OptionQuote>,
}

impl ScreenedInstrument {
    /// The value the DMI filter reads: the latest ADX.
    pub fn current_dmi(&self) -> f64 {
        self.dmi.current_dmi()
    }
}

/// Compute every indicator for one instrument and assemble its record.
pub fn build_record(
    meta: &InstrumentMeta,
    series: &PriceSeries,
    params: &IndicatorParams,
) -> Result<ScreenedInstrument, IndicatorError> {
    let bars = series.bars();

    let dmi = if params.include_dmi_history {
        calculate_dmi_with_history(bars, params.dmi_period)?
    } else {
        calculate_dmi(bars, params.dmi_period)?
    };

    let ppo = calculate_ppo(&series.closes(), params.ppo_fast, params.ppo_slow)?;
    let triple = ppo.latest_three()?;

    Ok(ScreenedInstrument {
        symbol: meta.symbol.clone(),
        name: meta.name.clone(),
        sector: meta.sector.clone(),
        industry: meta.industry.clone(),
        as_of: series.as_of(),
        price: series.last().close,
        day_change_pct: day_change_pct(bars),
        dmi,
        ppo: triple,
        ppo_slope: triple.slope(),
        ppo_hook: triple.hook(),
        returns: returns(bars),
        volume: volume_stats(bars, params.volume_window),
        optionable: meta.optionable,
        next_earnings: meta.next_earnings,
        option_quote: meta.option_quote.clone(),
    })
}
