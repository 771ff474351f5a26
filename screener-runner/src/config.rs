//! TOML screen configuration: indicator parameters, run settings and criteria.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::criteria::{CriteriaError, FilterCriteria};
use crate::pipeline::Screener;
use crate::ranking::RankKey;
use crate::record::{IndicatorParams, ParamsError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("serialize config: {0}")]
    Serialize(String),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// How a scan is executed and presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    pub parallel: bool,
    /// Private pool size; 0 uses rayon's global pool.
    pub threads: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_by: Option<RankKey>,
    pub descending: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: 0,
            rank_by: None,
            descending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub run: RunSettings,
    #[serde(default)]
    pub criteria: FilterCriteria,
}

impl ScreenConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.indicators.validate()?;
        self.criteria.validate()?;
        Ok(())
    }

    /// A screener configured from the `[indicators]` and `[run]` tables.
    pub fn screener(&self) -> Screener {
        Screener::new(self.indicators.clone())
            .with_parallelism(self.run.parallel)
            .with_threads(self.run.threads)
    }
}
