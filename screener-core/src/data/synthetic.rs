//! Deterministic price simulator.
//!
//! Each symbol gets its own random walk seeded by BLAKE3(master seed ‖ symbol),
//! so a symbol's series does not depend on which other symbols are generated
//! or in what order. Weekends are skipped.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::provider::{DataError, DataSource, PriceSource};
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Clone)]
pub struct SyntheticSource {
    master_seed: u64,
    bar_count: usize,
    start: NaiveDate,
}

impl SyntheticSource {
    pub const DEFAULT_BARS: usize = 300;

    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            bar_count: Self::DEFAULT_BARS,
            start: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap_or(NaiveDate::MIN),
        }
    }

    pub fn with_bar_count(mut self, bar_count: usize) -> Self {
        self.bar_count = bar_count.max(1);
        self
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    fn rng_for(&self, symbol: &str) -> StdRng {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        StdRng::from_seed(*hasher.finalize().as_bytes())
    }

    /// Generate the bars for `symbol`.
    pub fn generate(&self, symbol: &str) -> Vec<PriceBar> {
        let mut rng = self.rng_for(symbol);
        let mut price: f64 = rng.gen_range(20.0..400.0);
        let drift: f64 = rng.gen_range(-0.002..0.002);

        let mut bars = Vec::with_capacity(self.bar_count);
        let mut current = self.start;

        while bars.len() < self.bar_count {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += chrono::Duration::days(1);
                continue;
            }

            let daily_return: f64 = drift + rng.gen_range(-0.03..0.03);
            let open = price;
            let close = (price * (1.0 + daily_return)).max(0.01);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000..5_000_000u64);

            bars.push(PriceBar {
                date: current,
                open,
                high,
                low,
                close,
                volume,
            });

            price = close;
            current += chrono::Duration::days(1);
        }

        bars
    }
}

impl PriceSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn kind(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        PriceSeries::new(self.generate(symbol)).map_err(|source| DataError::InvalidSeries {
            symbol: symbol.to_string(),
            source,
        })
    }
}
