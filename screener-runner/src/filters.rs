//! Filter chain: ordered predicates over enriched records.
//!
//! Stages run in a fixed order: price → DMI → PPO slope → PPO hook → sector →
//! optionable → earnings. A record survives only if every active stage passes.
//! The predicates commute, so the order only affects which stage is reported
//! as the rejecting one and how early evaluation stops.

use crate::criteria::{
    DmiFilter, EarningsFilter, FilterCriteria, HookFilter, PpoSlopeFilter, PriceFilter,
};
use crate::record::ScreenedInstrument;

/// Trait for record filters.
///
/// Filters are pure: they see only the record, never scan state.
pub trait RecordFilter: Send + Sync {
    /// Stage name (e.g., "price", "dmi").
    fn name(&self) -> &str;

    /// Whether the record satisfies this stage.
    fn passes(&self, record: &ScreenedInstrument) -> bool;
}

/// One active stage of the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterStage {
    Price(PriceFilter),
    Dmi(DmiFilter),
    PpoSlope(PpoSlopeFilter),
    PpoHook(HookFilter),
    Sector(String),
    Optionable(bool),
    Earnings(EarningsFilter),
}

impl RecordFilter for FilterStage {
    fn name(&self) -> &str {
        match self {
            FilterStage::Price(_) => "price",
            FilterStage::Dmi(_) => "dmi",
            FilterStage::PpoSlope(_) => "ppo_slope",
            FilterStage::PpoHook(_) => "ppo_hook",
            FilterStage::Sector(_) => "sector",
            FilterStage::Optionable(_) => "optionable",
            FilterStage::Earnings(_) => "earnings",
        }
    }

    fn passes(&self, record: &ScreenedInstrument) -> bool {
        match self {
            FilterStage::Price(f) => f.passes(record.price),
            FilterStage::Dmi(f) => f.passes(record.current_dmi()),
            FilterStage::PpoSlope(f) => f.passes(record.ppo_slope),
            FilterStage::PpoHook(f) => f.passes(record.ppo_hook),
            FilterStage::Sector(sector) => record.sector.trim().eq_ignore_ascii_case(sector),
            FilterStage::Optionable(wanted) => record.optionable == *wanted,
            FilterStage::Earnings(f) => f.passes(record.as_of, record.next_earnings),
        }
    }
}

/// Ordered list of active stages built from criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    /// Build the chain. Inactive sub-filters contribute no stage.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut stages = Vec::new();

        if let Some(price) = criteria.price {
            stages.push(FilterStage::Price(price));
        }
        if let Some(dmi) = criteria.dmi {
            if dmi.min.is_some() || dmi.max.is_some() {
                stages.push(FilterStage::Dmi(dmi));
            }
        }
        if let Some(slope) = criteria.ppo_slope {
            stages.push(FilterStage::PpoSlope(slope));
        }
        if criteria.ppo_hook != HookFilter::All {
            stages.push(FilterStage::PpoHook(criteria.ppo_hook));
        }
        if let Some(sector) = criteria.active_sector() {
            stages.push(FilterStage::Sector(sector.to_string()));
        }
        if let Some(optionable) = criteria.optionable {
            stages.push(FilterStage::Optionable(optionable));
        }
        if let Some(earnings) = criteria.earnings {
            stages.push(FilterStage::Earnings(earnings));
        }

        Self { stages }
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// True when every stage passes. Stops at the first failure.
    pub fn evaluate(&self, record: &ScreenedInstrument) -> bool {
        self.stages.iter().all(|stage| stage.passes(record))
    }

    /// The first stage that rejects the record, if any.
    pub fn first_rejection(&self, record: &ScreenedInstrument) -> Option<&FilterStage> {
        self.stages.iter().find(|stage| !stage.passes(record))
    }

    /// Keep the passing records, preserving their order.
    pub fn apply(
        &self,
        records: impl IntoIterator<Item = ScreenedInstrument>,
    ) -> Vec<ScreenedInstrument> {
        records.into_iter().filter(|r| self.evaluate(r)).collect()
    }
}
