//! Screener Runner: the screening pipeline over a universe of instruments.
//!
//! This crate handles:
//! - Filter criteria and pre-flight validation
//! - ScreenedInstrument assembly from indicators and metadata
//! - The fixed-order filter chain
//! - Parallel, cancellable scans producing a [`ScreenReport`]
//! - Ranking and TOML screen configuration

pub mod config;
pub mod criteria;
pub mod filters;
pub mod pipeline;
pub mod ranking;
pub mod record;

pub use config::{ConfigError, RunSettings, ScreenConfig};
pub use criteria::{
    CriteriaError, DmiFilter, EarningsFilter, FilterCriteria, HookFilter, PpoSlopeFilter,
    PriceFilter,
};
pub use filters::{FilterChain, FilterStage, RecordFilter};
pub use pipeline::{
    Inspection, InstrumentData, ScreenError, ScreenReport, Screener, SkipReason,
    SkippedInstrument,
};
pub use ranking::{rank, RankKey};
pub use record::{build_record, IndicatorParams, ParamsError, ScreenedInstrument};


#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything crossing worker threads is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<ScreenedInstrument>();
        require_sync::<ScreenedInstrument>();
        require_sync::<FilterChain>();
        require_sync::<FilterCriteria>();
        require_sync::<Screener>();
        require_send::<ScreenReport>();
        require_sync::<InstrumentData>();
    }
}
