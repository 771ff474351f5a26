//! Result ordering for presentation.
//!
//! Ranking is applied after filtering and never changes which records pass.
//! Missing or NaN keys always sort last, whatever the direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::record::ScreenedInstrument;

/// Column a report can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    Symbol,
    Price,
    Adx,
    DiPlus,
    DiMinus,
    PpoSlope,
    Ppo,
    DayChange,
    #[serde(rename = "return_1y")]
    Return1Y,
    Volume,
}

impl RankKey {
    fn value(self, record: &ScreenedInstrument) -> Option<f64> {
        let v = match self {
            RankKey::Symbol => return None,
            RankKey::Price => record.price,
            RankKey::Adx => record.dmi.adx,
            RankKey::DiPlus => record.dmi.di_plus,
            RankKey::DiMinus => record.dmi.di_minus,
            RankKey::PpoSlope => record.ppo_slope,
            RankKey::Ppo => record.ppo.today,
            RankKey::DayChange => record.day_change_pct?,
            RankKey::Return1Y => record.returns.year?.pct,
            RankKey::Volume => record.volume.latest as f64,
        };
        (!v.is_nan()).then_some(v)
    }
}

impl std::str::FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "symbol" => Ok(RankKey::Symbol),
            "price" => Ok(RankKey::Price),
            "adx" | "dmi" => Ok(RankKey::Adx),
            "di_plus" => Ok(RankKey::DiPlus),
            "di_minus" => Ok(RankKey::DiMinus),
            "ppo_slope" | "slope" => Ok(RankKey::PpoSlope),
            "ppo" => Ok(RankKey::Ppo),
            "day_change" => Ok(RankKey::DayChange),
            "return_1y" => Ok(RankKey::Return1Y),
            "volume" => Ok(RankKey::Volume),
            other => Err(format!("unknown rank key '{other}'")),
        }
    }
}

/// Stable sort of `records` by `key`.
pub fn rank(records: &mut [ScreenedInstrument], key: RankKey, descending: bool) {
    if key == RankKey::Symbol {
        records.sort_by(|a, b| {
            let ord = a.symbol.cmp(&b.symbol);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
        return;
    }

    records.sort_by(|a, b| match (key.value(a), key.value(b)) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_record;

    fn records() -> Vec<ScreenedInstrument> {
        [("B", 20.0, Some(1.0)), ("A", 30.0, None), ("C", 10.0, Some(-2.0))]
            .into_iter()
            .map(|(s, adx, change)| {
                let mut r = sample_record(s);
                r.dmi.adx = adx;
                r.day_change_pct = change;
                r
            })
            .collect()
    }

    fn symbols(records: &[ScreenedInstrument]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn rank_by_adx_both_directions() {
        let mut r = records();
        rank(&mut r, RankKey::Adx, true);
        assert_eq!(symbols(&r), vec!["A", "B", "C"]);
        rank(&mut r, RankKey::Adx, false);
        assert_eq!(symbols(&r), vec!["C", "B", "A"]);
    }

    #[test]
    fn missing_values_sort_last() {
        let mut r = records();
        rank(&mut r, RankKey::DayChange, true);
        assert_eq!(symbols(&r), vec!["B", "C", "A"]);
        rank(&mut r, RankKey::DayChange, false);
        assert_eq!(symbols(&r), vec!["C", "B", "A"]);
    }

    #[test]
    fn nan_sorts_last() {
        let mut r = records();
        r[2].dmi.adx = f64::NAN;
        rank(&mut r, RankKey::Adx, false);
        assert_eq!(symbols(&r), vec!["B", "A", "C"]);
    }

    #[test]
    fn rank_by_symbol() {
        let mut r = records();
        rank(&mut r, RankKey::Symbol, false);
        assert_eq!(symbols(&r), vec!["A", "B", "C"]);
    }

    #[test]
    fn parse_rank_keys() {
        assert_eq!("ADX".parse::<RankKey>(), Ok(RankKey::Adx));
        assert_eq!("ppo-slope".parse::<RankKey>(), Ok(RankKey::PpoSlope));
        assert_eq!("return_1y".parse::<RankKey>(), Ok(RankKey::Return1Y));
        assert!("bogus".parse::<RankKey>().is_err());
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&RankKey::PpoSlope).unwrap();
        assert_eq!(json, "\"ppo_slope\"");
        let key: RankKey = serde_json::from_str("\"return_1y\"").unwrap();
        assert_eq!(key, RankKey::Return1Y);
    }
}
