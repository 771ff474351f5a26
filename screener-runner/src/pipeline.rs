//! Screening pipeline.
//!
//! For each instrument: compute the record, then run the filter chain.
//! Instruments without enough history are skipped, never fatal. Criteria and
//! indicator parameters are validated once, before any computation starts.
//!
//! Scans can run on rayon's global pool, on a private pool of `threads`
//! workers, or sequentially. The output keeps universe order either way.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use screener_core::data::{DataSource, PriceSource, UniverseProvider};
use screener_core::domain::{InstrumentMeta, PriceSeries};
use screener_core::IndicatorError;

use crate::criteria::{CriteriaError, FilterCriteria};
use crate::filters::{FilterChain, RecordFilter};
use crate::record::{build_record, IndicatorParams, ParamsError, ScreenedInstrument};

/// Errors that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    InvalidCriteria(#[from] CriteriaError),

    #[error(transparent)]
    InvalidParams(#[from] ParamsError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl ScreenError {
    /// Stable machine-readable code for hosting layers.
    pub fn code(&self) -> &'static str {
        match self {
            ScreenError::InvalidCriteria(_) => "invalid_criteria",
            ScreenError::InvalidParams(_) => "invalid_params",
            ScreenError::ThreadPool(_) => "thread_pool",
        }
    }
}

/// Metadata plus already-fetched price history for one instrument.
#[derive(Debug, Clone)]
pub struct InstrumentData {
    pub meta: InstrumentMeta,
    pub series: PriceSeries,
}

impl InstrumentData {
    pub fn new(meta: InstrumentMeta, series: PriceSeries) -> Self {
        Self { meta, series }
    }
}

/// Why an instrument was left out of the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    InsufficientData { required: usize, available: usize },
    Indicator { reason: String },
    Data { reason: String },
}

impl From<IndicatorError> for SkipReason {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InsufficientData {
                required,
                available,
            } => SkipReason::InsufficientData {
                required,
                available,
            },
            other => SkipReason::Indicator {
                reason: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedInstrument {
    pub symbol: String,
    pub reason: SkipReason,
}

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Surviving records, in universe order.
    pub results: Vec<ScreenedInstrument>,
    pub skipped: Vec<SkippedInstrument>,
    /// Instruments evaluated before the scan finished or was cancelled.
    pub scanned: usize,
    /// Instruments in the universe.
    pub total: usize,
    pub cancelled: bool,
    /// BLAKE3 fingerprint of the criteria.
    pub criteria_hash: String,
    /// Provenance of the price history, when fetched through a [`PriceSource`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DataSource>,
}

impl ScreenReport {
    pub fn passed(&self) -> usize {
        self.results.len()
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.symbol.as_str()).collect()
    }
}

/// Diagnostic view of one instrument against a set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspection {
    pub symbol: String,
    pub record: Option<ScreenedInstrument>,
    pub passed: bool,
    /// First stage that rejected the record.
    pub rejected_by: Option<String>,
    pub skipped: Option<SkipReason>,
}

enum Outcome {
    Passed(Box<ScreenedInstrument>),
    Rejected,
    Skipped(SkippedInstrument),
    NotStarted,
}

/// Runs scans with a fixed set of indicator parameters.
#[derive(Debug, Clone)]
pub struct Screener {
    params: IndicatorParams,
    parallel: bool,
    threads: usize,
}

impl Default for Screener {
    fn default() -> Self {
        Self::new(IndicatorParams::default())
    }
}

impl Screener {
    pub fn new(params: IndicatorParams) -> Self {
        Self {
            params,
            parallel: true,
            threads: 0,
        }
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Worker count for a private pool; 0 uses rayon's global pool.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Screen instruments whose history is already loaded.
    pub fn screen(
        &self,
        instruments: &[InstrumentData],
        criteria: &FilterCriteria,
        cancel: Option<&AtomicBool>,
    ) -> Result<ScreenReport, ScreenError> {
        let chain = self.preflight(criteria)?;
        let outcomes = self.run(instruments, cancel, |item| {
            self.evaluate(&item.meta, &item.series, &chain)
        })?;
        Ok(summarize(outcomes, criteria, None))
    }

    /// Screen a universe, fetching each series from `source`.
    ///
    /// A failed fetch skips that instrument with a `Data` reason.
    pub fn screen_universe(
        &self,
        universe: &dyn UniverseProvider,
        source: &dyn PriceSource,
        criteria: &FilterCriteria,
        cancel: Option<&AtomicBool>,
    ) -> Result<ScreenReport, ScreenError> {
        let chain = self.preflight(criteria)?;
        let outcomes = self.run(universe.instruments(), cancel, |meta| {
            match source.fetch(&meta.symbol) {
                Ok(series) => self.evaluate(meta, &series, &chain),
                Err(err) => {
                    debug!(symbol = %meta.symbol, source = source.name(), error = %err, "fetch failed");
                    Outcome::Skipped(SkippedInstrument {
                        symbol: meta.symbol.clone(),
                        reason: SkipReason::Data {
                            reason: err.to_string(),
                        },
                    })
                }
            }
        })?;
        Ok(summarize(outcomes, criteria, Some(source.kind())))
    }

    /// Re-apply criteria to records from an earlier scan.
    pub fn refilter(
        &self,
        records: Vec<ScreenedInstrument>,
        criteria: &FilterCriteria,
    ) -> Result<Vec<ScreenedInstrument>, ScreenError> {
        criteria.validate()?;
        Ok(FilterChain::from_criteria(criteria).apply(records))
    }

    /// Evaluate one instrument and report which stage, if any, rejects it.
    pub fn inspect(
        &self,
        meta: &InstrumentMeta,
        series: &PriceSeries,
        criteria: &FilterCriteria,
    ) -> Result<Inspection, ScreenError> {
        let chain = self.preflight(criteria)?;
        let inspection = match build_record(meta, series, &self.params) {
            Ok(record) => {
                let rejected_by = chain.first_rejection(&record).map(|s| s.name().to_string());
                Inspection {
                    symbol: meta.symbol.clone(),
                    passed: rejected_by.is_none(),
                    record: Some(record),
                    rejected_by,
                    skipped: None,
                }
            }
            Err(err) => Inspection {
                symbol: meta.symbol.clone(),
                record: None,
                passed: false,
                rejected_by: None,
                skipped: Some(err.into()),
            },
        };
        Ok(inspection)
    }

    fn preflight(&self, criteria: &FilterCriteria) -> Result<FilterChain, ScreenError> {
        self.params.validate()?;
        criteria.validate()?;
        Ok(FilterChain::from_criteria(criteria))
    }

    fn evaluate(&self, meta: &InstrumentMeta, series: &PriceSeries, chain: &FilterChain) -> Outcome {
        match build_record(meta, series, &self.params) {
            Ok(record) => match chain.first_rejection(&record) {
                None => Outcome::Passed(Box::new(record)),
                Some(stage) => {
                    debug!(symbol = %meta.symbol, stage = stage.name(), "rejected");
                    Outcome::Rejected
                }
            },
            Err(err) => {
                debug!(
                    symbol = %meta.symbol,
                    bars = series.len(),
                    min_bars = self.params.min_bars(),
                    error = %err,
                    "skipped"
                );
                Outcome::Skipped(SkippedInstrument {
                    symbol: meta.symbol.clone(),
                    reason: err.into(),
                })
            }
        }
    }

    /// Map `f` over `items` in order, checking `cancel` before each one starts.
    fn run<T, F>(
        &self,
        items: &[T],
        cancel: Option<&AtomicBool>,
        f: F,
    ) -> Result<Vec<Outcome>, ScreenError>
    where
        T: Sync,
        F: Fn(&T) -> Outcome + Sync,
    {
        let step = |item: &T| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                Outcome::NotStarted
            } else {
                f(item)
            }
        };

        if !self.parallel {
            return Ok(items.iter().map(step).collect());
        }

        if self.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.threads)
                .build()
                .map_err(|e| ScreenError::ThreadPool(e.to_string()))?;
            Ok(pool.install(|| items.par_iter().map(step).collect()))
        } else {
            Ok(items.par_iter().map(step).collect())
        }
    }
}

fn summarize(
    outcomes: Vec<Outcome>,
    criteria: &FilterCriteria,
    source: Option<DataSource>,
) -> ScreenReport {
    let total = outcomes.len();
    let mut results = Vec::new();
    let mut skipped = Vec::new();
    let mut not_started = 0usize;

    for outcome in outcomes {
        match outcome {
            Outcome::Passed(record) => results.push(*record),
            Outcome::Rejected => {}
            Outcome::Skipped(s) => skipped.push(s),
            Outcome::NotStarted => not_started += 1,
        }
    }

    let cancelled = not_started > 0;
    if cancelled {
        warn!(not_started, total, "screen cancelled");
    }

    let report = ScreenReport {
        results,
        skipped,
        scanned: total - not_started,
        total,
        cancelled,
        criteria_hash: criteria.fingerprint(),
        source,
    };
    info!(
        scanned = report.scanned,
        passed = report.passed(),
        skipped = report.skipped.len(),
        cancelled = report.cancelled,
        "screen complete"
    );
    report
}
