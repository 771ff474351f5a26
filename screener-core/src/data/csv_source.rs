//! CSV directory source: one `<SYMBOL>.csv` file per instrument.
//!
//! Expected header: `date,open,high,low,close[,volume]`, dates as YYYY-MM-DD,
//! rows oldest first.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::data::provider::{DataError, DataSource, PriceSource};
use crate::domain::{PriceBar, PriceSeries};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

/// Parse CSV text into a validated series.
pub fn parse_csv(symbol: &str, reader: impl std::io::Read) -> Result<PriceSeries, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bars = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        let row = row.map_err(|e| DataError::Csv {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        })?;
        bars.push(PriceBar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.unwrap_or(0),
        });
    }
    PriceSeries::new(bars).map_err(|source| DataError::InvalidSeries {
        symbol: symbol.to_string(),
        source,
    })
}

impl PriceSource for CsvDirSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn kind(&self) -> DataSource {
        DataSource::CsvImport
    }

    fn fetch(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = self.path_for(symbol);
        let file = std::fs::File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            _ => DataError::Io {
                symbol: symbol.to_string(),
                reason: format!("{}: {e}", path.display()),
            },
        })?;
        parse_csv(symbol, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    const SAMPLE: &str = "date,open,high,low,close,volume
2024-01-02,100.0,105.0,95.0,102.0,1500
2024-01-03,102.0,108.0,100.0,106.0,1700
";

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("screener_csv_{}_{id}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn parse_with_volume() {
        let series = parse_csv("TEST", SAMPLE.as_bytes()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().close, 106.0);
        assert_eq!(series.last().volume, 1700);
    }

    #[test]
    fn parse_without_volume_column() {
        let text = "date,open,high,low,close\n2024-01-02,1,2,0.5,1.5\n";
        let series = parse_csv("TEST", text.as_bytes()).unwrap();
        assert_eq!(series.last().volume, 0);
    }

    #[test]
    fn parse_rejects_bad_number() {
        let text = "date,open,high,low,close\n2024-01-02,abc,2,0.5,1.5\n";
        assert!(matches!(
            parse_csv("TEST", text.as_bytes()),
            Err(DataError::Csv { .. })
        ));
    }

    #[test]
    fn parse_rejects_empty_file() {
        let text = "date,open,high,low,close\n";
        assert!(matches!(
            parse_csv("TEST", text.as_bytes()),
            Err(DataError::InvalidSeries { .. })
        ));
    }

    #[test]
    fn dir_source_reads_symbol_file() {
        let dir = temp_dir();
        std::fs::write(dir.join("SPY.csv"), SAMPLE).unwrap();
        let source = CsvDirSource::new(&dir);
        assert_eq!(source.fetch("SPY").unwrap().len(), 2);
        assert!(matches!(
            source.fetch("QQQ"),
            Err(DataError::SymbolNotFound { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
