//! User-supplied filter criteria and pre-flight validation.
//!
//! Every sub-filter is optional. An absent sub-filter, `ppo_hook = "all"` or
//! `sector = "all"` imposes no constraint. Field names also accept the
//! camelCase spelling used by request bodies (`priceFilter`, `dmiFilter`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use screener_core::indicators::HookPattern;

/// Sentinel meaning "no constraint" for string-valued filters.
pub const ALL: &str = "all";

const MAX_EARNINGS_DAYS: u32 = 366;

/// Pre-flight validation failure. Aborts the whole scan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("invalid criteria field '{field}': {reason}")]
    InvalidCriteria { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> CriteriaError {
    CriteriaError::InvalidCriteria {
        field,
        reason: reason.into(),
    }
}

/// Price constraint on the latest close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceFilter {
    /// price <= max
    Under { max: f64 },
    /// min <= price <= max
    Range { min: f64, max: f64 },
}

impl PriceFilter {
    pub fn passes(&self, price: f64) -> bool {
        match *self {
            PriceFilter::Under { max } => price <= max,
            PriceFilter::Range { min, max } => min <= price && price <= max,
        }
    }

    fn validate(&self) -> Result<(), CriteriaError> {
        match *self {
            PriceFilter::Under { max } => {
                if !max.is_finite() || max <= 0.0 {
                    return Err(invalid("price", format!("max must be a positive number, got {max}")));
                }
            }
            PriceFilter::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(invalid("price", "range bounds must be finite"));
                }
                if min < 0.0 {
                    return Err(invalid("price", format!("min must be >= 0, got {min}")));
                }
                if min >= max {
                    return Err(invalid("price", format!("min ({min}) must be below max ({max})")));
                }
            }
        }
        Ok(())
    }
}

/// Inclusive band on the current DMI reading (latest ADX).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DmiFilter {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl DmiFilter {
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn passes(&self, dmi: f64) -> bool {
        self.min.map_or(true, |min| dmi >= min) && self.max.map_or(true, |max| dmi <= max)
    }

    fn validate(&self) -> Result<(), CriteriaError> {
        for bound in [self.min, self.max].into_iter().flatten() {
            if !(0.0..=100.0).contains(&bound) {
                return Err(invalid("dmi", format!("bound {bound} outside [0, 100]")));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min >= max {
                return Err(invalid("dmi", format!("min ({min}) must be below max ({max})")));
            }
        }
        Ok(())
    }
}

/// Minimum magnitude of the PPO slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PpoSlopeFilter {
    pub threshold: f64,
}

impl PpoSlopeFilter {
    pub fn passes(&self, slope: f64) -> bool {
        slope.abs() >= self.threshold
    }

    fn validate(&self) -> Result<(), CriteriaError> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(invalid(
                "ppo_slope",
                format!("threshold must be a non-negative number, got {}", self.threshold),
            ));
        }
        Ok(())
    }
}

/// Which PPO hook variants are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookFilter {
    #[default]
    All,
    Positive,
    Negative,
    Both,
}

impl HookFilter {
    pub fn passes(&self, hook: HookPattern) -> bool {
        match self {
            HookFilter::All => true,
            HookFilter::Positive => hook == HookPattern::Positive,
            HookFilter::Negative => hook == HookPattern::Negative,
            HookFilter::Both => hook.is_hook(),
        }
    }
}

/// Window around the next earnings date, counted in calendar days from the
/// instrument's last bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarningsFilter {
    /// Earnings fall within `[as_of, as_of + days]`.
    Within { days: u32 },
    /// No known earnings inside `[as_of, as_of + days]`.
    Outside { days: u32 },
}

impl EarningsFilter {
    pub fn passes(&self, as_of: NaiveDate, next_earnings: Option<NaiveDate>) -> bool {
        let inside = |days: u32| {
            // Past the end of the calendar the window has no upper bound.
            let end = as_of.checked_add_signed(chrono::Duration::days(i64::from(days)));
            next_earnings
                .is_some_and(|date| date >= as_of && end.map_or(true, |end| date <= end))
        };
        match *self {
            EarningsFilter::Within { days } => inside(days),
            EarningsFilter::Outside { days } => !inside(days),
        }
    }

    fn days(&self) -> u32 {
        match *self {
            EarningsFilter::Within { days } | EarningsFilter::Outside { days } => days,
        }
    }
}

/// The complete set of screening constraints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, alias = "priceFilter", skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceFilter>,

    #[serde(default, alias = "dmiFilter", skip_serializing_if = "Option::is_none")]
    pub dmi: Option<DmiFilter>,

    #[serde(default, alias = "ppoSlopeFilter", skip_serializing_if = "Option::is_none")]
    pub ppo_slope: Option<PpoSlopeFilter>,

    #[serde(default, alias = "ppoHookFilter")]
    pub ppo_hook: HookFilter,

    #[serde(default, alias = "sectorFilter", skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(default, alias = "optionableFilter", skip_serializing_if = "Option::is_none")]
    pub optionable: Option<bool>,

    #[serde(default, alias = "earningsFilter", skip_serializing_if = "Option::is_none")]
    pub earnings: Option<EarningsFilter>,
}

impl FilterCriteria {
    /// Criteria that accept every instrument.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, price: PriceFilter) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_dmi(mut self, dmi: DmiFilter) -> Self {
        self.dmi = Some(dmi);
        self
    }

    pub fn with_ppo_slope(mut self, threshold: f64) -> Self {
        self.ppo_slope = Some(PpoSlopeFilter { threshold });
        self
    }

    pub fn with_ppo_hook(mut self, hook: HookFilter) -> Self {
        self.ppo_hook = hook;
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_optionable(mut self, optionable: bool) -> Self {
        self.optionable = Some(optionable);
        self
    }

    pub fn with_earnings(mut self, earnings: EarningsFilter) -> Self {
        self.earnings = Some(earnings);
        self
    }

    /// The sector constraint, or `None` when absent or the "all" sentinel.
    pub fn active_sector(&self) -> Option<&str> {
        self.sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.eq_ignore_ascii_case(ALL))
    }

    /// Check internal consistency before any computation starts.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if let Some(price) = &self.price {
            price.validate()?;
        }
        if let Some(dmi) = &self.dmi {
            dmi.validate()?;
        }
        if let Some(slope) = &self.ppo_slope {
            slope.validate()?;
        }
        if let Some(sector) = &self.sector {
            if sector.trim().is_empty() {
                return Err(invalid("sector", "must not be empty (use \"all\")"));
            }
        }
        if let Some(earnings) = &self.earnings {
            if earnings.days() > MAX_EARNINGS_DAYS {
                return Err(invalid(
                    "earnings",
                    format!("window of {} days exceeds {MAX_EARNINGS_DAYS}", earnings.days()),
                ));
            }
        }
        Ok(())
    }

    /// Deterministic BLAKE3 digest of the criteria, hex encoded.
    ///
    /// Two scans with identical criteria share the same hash.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
