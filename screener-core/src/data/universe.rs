//! Universe of screenable instruments.
//!
//! The pipeline reads the universe through [`UniverseProvider`] so tests and
//! hosts can inject any catalog. [`StaticUniverse`] is the TOML-backed
//! implementation: an ordered list of `[[instruments]]` tables.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::InstrumentMeta;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("parse universe TOML: {0}")]
    Parse(String),

    #[error("serialize universe: {0}")]
    Serialize(String),

    #[error("duplicate symbol in universe: {0}")]
    DuplicateSymbol(String),
}

/// Read-only source of instrument metadata, in screening order.
pub trait UniverseProvider: Send + Sync {
    fn instruments(&self) -> &[InstrumentMeta];

    fn get(&self, symbol: &str) -> Option<&InstrumentMeta> {
        self.instruments().iter().find(|m| m.symbol == symbol)
    }

    fn len(&self) -> usize {
        self.instruments().len()
    }

    fn is_empty(&self) -> bool {
        self.instruments().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticUniverse {
    #[serde(default)]
    instruments: Vec<InstrumentMeta>,
}

impl StaticUniverse {
    /// Build from metadata, rejecting duplicate symbols.
    pub fn new(instruments: Vec<InstrumentMeta>) -> Result<Self, UniverseError> {
        let mut seen = std::collections::HashSet::new();
        for meta in &instruments {
            if !seen.insert(meta.symbol.as_str()) {
                return Err(UniverseError::DuplicateSymbol(meta.symbol.clone()));
            }
        }
        Ok(Self { instruments })
    }

    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|e| UniverseError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        let parsed: StaticUniverse =
            toml::from_str(content).map_err(|e| UniverseError::Parse(e.to_string()))?;
        Self::new(parsed.instruments)
    }

    /// Serialize the universe to TOML.
    pub fn to_toml(&self) -> Result<String, UniverseError> {
        toml::to_string_pretty(self).map_err(|e| UniverseError::Serialize(e.to_string()))
    }

    /// Symbols grouped by sector name.
    pub fn sectors(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut sectors: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for meta in &self.instruments {
            sectors
                .entry(meta.sector.as_str())
                .or_default()
                .push(meta.symbol.as_str());
        }
        sectors
    }

    /// Instruments whose sector matches, ignoring case.
    pub fn by_sector(&self, sector: &str) -> Vec<&InstrumentMeta> {
        self.instruments
            .iter()
            .filter(|m| m.sector.eq_ignore_ascii_case(sector))
            .collect()
    }

    /// A small US equity catalog for demos and synthetic runs.
    pub fn default_us() -> Self {
        let rows: &[(&str, &str, &str, &str, bool)] = &[
            ("AAPL", "Apple Inc.", "Technology", "Consumer Electronics", true),
            ("MSFT", "Microsoft Corp.", "Technology", "Software", true),
            ("NVDA", "NVIDIA Corp.", "Technology", "Semiconductors", true),
            ("ORCL", "Oracle Corp.", "Technology", "Software", true),
            ("JNJ", "Johnson & Johnson", "Healthcare", "Pharmaceuticals", true),
            ("UNH", "UnitedHealth Group", "Healthcare", "Managed Care", true),
            ("PFE", "Pfizer Inc.", "Healthcare", "Pharmaceuticals", true),
            ("JPM", "JPMorgan Chase & Co.", "Finance", "Banks", true),
            ("GS", "Goldman Sachs Group", "Finance", "Capital Markets", true),
            ("SCHW", "Charles Schwab Corp.", "Finance", "Capital Markets", true),
            ("XOM", "Exxon Mobil Corp.", "Energy", "Oil & Gas", true),
            ("CVX", "Chevron Corp.", "Energy", "Oil & Gas", true),
            ("PSX", "Phillips 66", "Energy", "Refining", false),
            ("WMT", "Walmart Inc.", "Consumer", "Retail", true),
            ("KO", "Coca-Cola Co.", "Consumer", "Beverages", true),
            ("SBUX", "Starbucks Corp.", "Consumer", "Restaurants", true),
            ("TGT", "Target Corp.", "Consumer", "Retail", false),
        ];

        let instruments = rows
            .iter()
            .map(|&(symbol, name, sector, industry, optionable)| {
                InstrumentMeta::new(symbol, sector)
                    .with_name(name)
                    .with_industry(industry)
                    .with_optionable(optionable)
            })
            .collect();

        Self { instruments }
    }
}

impl UniverseProvider for StaticUniverse {
    fn instruments(&self) -> &[InstrumentMeta] {
        &self.instruments
    }
}
