//! PriceBar and PriceSeries: the market data units the indicators consume.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Daily OHLC bar for a single instrument.
///
/// `volume` is optional in source data; absent volume is recorded as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl PriceBar {
    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// `low <= {open, close} <= high`.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}

/// Errors raised while assembling a [`PriceSeries`].
#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("price series is empty")]
    Empty,

    #[error("bar dates not strictly increasing at index {index} ({date})")]
    Unordered { index: usize, date: NaiveDate },

    #[error("bar at index {index} ({date}) violates low <= open/close <= high")]
    InsaneBar { index: usize, date: NaiveDate },
}

/// Ordered (oldest → newest) bar history for one instrument. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and wrap a bar vector.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        for (i, bar) in bars.iter().enumerate() {
            if !bar.is_sane() {
                return Err(SeriesError::InsaneBar {
                    index: i,
                    date: bar.date,
                });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(SeriesError::Unordered {
                    index: i,
                    date: bar.date,
                });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn last(&self) -> &PriceBar {
        // Construction guarantees at least one bar.
        &self.bars[self.bars.len() - 1]
    }

    /// Date of the most recent bar.
    pub fn as_of(&self) -> NaiveDate {
        self.last().date
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            bars: Vec<PriceBar>,
        }
        let raw = Raw::deserialize(deserializer)?;
        PriceSeries::new(raw.bars).map_err(serde::de::Error::custom)
    }
}
