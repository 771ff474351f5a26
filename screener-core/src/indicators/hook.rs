//! PPO hook: a one-session reversal in three consecutive PPO readings.

use serde::{Deserialize, Serialize};

use crate::error::IndicatorError;
use crate::indicators::ppo::PpoTriple;

/// Hook variant found at the latest PPO reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookPattern {
    /// Local minimum yesterday, uptick today.
    Positive,
    /// Local maximum yesterday, downtick today.
    Negative,
    None,
}

impl HookPattern {
    pub fn is_hook(self) -> bool {
        !matches!(self, HookPattern::None)
    }
}

/// Detect a hook from the three most recent PPO values (most recent first).
pub fn detect_hook(recent: &[f64]) -> Result<HookPattern, IndicatorError> {
    PpoTriple::from_recent(recent).map(|t| t.hook())
}

pub(crate) fn classify_hook(today: f64, yesterday: f64, day_before: f64) -> HookPattern {
    if today > yesterday && yesterday < day_before {
        HookPattern::Positive
    } else if today < yesterday && yesterday > day_before {
        HookPattern::Negative
    } else {
        HookPattern::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_hook() {
        assert_eq!(detect_hook(&[2.0, 1.0, 3.0]).unwrap(), HookPattern::Positive);
    }

    #[test]
    fn negative_hook() {
        assert_eq!(detect_hook(&[1.0, 2.0, 0.0]).unwrap(), HookPattern::Negative);
    }

    #[test]
    fn flat_is_none() {
        assert_eq!(detect_hook(&[1.0, 1.0, 1.0]).unwrap(), HookPattern::None);
    }

    #[test]
    fn monotonic_is_none() {
        assert_eq!(detect_hook(&[3.0, 2.0, 1.0]).unwrap(), HookPattern::None);
        assert_eq!(detect_hook(&[1.0, 2.0, 3.0]).unwrap(), HookPattern::None);
    }

    #[test]
    fn ties_resolve_to_none() {
        assert_eq!(detect_hook(&[2.0, 1.0, 1.0]).unwrap(), HookPattern::None);
        assert_eq!(detect_hook(&[1.0, 1.0, 2.0]).unwrap(), HookPattern::None);
    }

    #[test]
    fn sign_of_values_does_not_matter() {
        assert_eq!(
            detect_hook(&[-2.0, -3.0, -1.0]).unwrap(),
            HookPattern::Positive
        );
    }

    #[test]
    fn needs_three_values() {
        assert!(detect_hook(&[1.0]).is_err());
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&HookPattern::Positive).unwrap(),
            "\"positive\""
        );
        assert!(HookPattern::Negative.is_hook());
        assert!(!HookPattern::None.is_hook());
    }
}
