//! Indicator failure taxonomy.
//!
//! Zero denominators are not errors; they resolve to 0 inside the formulas.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: {required} values required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("invalid {name} period: {value}")]
    InvalidPeriod { name: &'static str, value: usize },
}

impl IndicatorError {
    pub(crate) fn insufficient(required: usize, available: usize) -> Self {
        Self::InsufficientData {
            required,
            available,
        }
    }
}
