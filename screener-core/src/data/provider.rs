//! Price source trait and structured error types.
//!
//! The PriceSource trait abstracts over where bar history comes from (CSV files,
//! the deterministic simulator, an in-memory map) so the screening pipeline is
//! agnostic to data selection and caching.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PriceSeries, SeriesError};

/// Structured error types for price data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("invalid series for {symbol}: {source}")]
    InvalidSeries {
        symbol: String,
        #[source]
        source: SeriesError,
    },

    #[error("csv error for {symbol}: {reason}")]
    Csv { symbol: String, reason: String },

    #[error("I/O error for {symbol}: {reason}")]
    Io { symbol: String, reason: String },
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    CsvImport,
    Synthetic,
    Memory,
}

/// Trait for price history providers.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Provenance tag for series produced by this source.
    fn kind(&self) -> DataSource;

    /// Fetch the full daily history for `symbol`, oldest first.
    fn fetch(&self, symbol: &str) -> Result<PriceSeries, DataError>;
}

/// Pre-loaded series keyed by symbol.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    series: HashMap<String, PriceSeries>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, series: PriceSeries) {
        self.series.insert(symbol.into(), series);
    }

    pub fn with(mut self, symbol: impl Into<String>, series: PriceSeries) -> Self {
        self.insert(symbol, series);
        self
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl PriceSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn kind(&self) -> DataSource {
        DataSource::Memory
    }

    fn fetch(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}
