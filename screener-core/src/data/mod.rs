//! Price sources and the instrument universe.

pub mod csv_source;
pub mod provider;
pub mod synthetic;
pub mod universe;

pub use csv_source::{parse_csv, CsvDirSource};
pub use provider::{DataError, DataSource, MemorySource, PriceSource};
pub use synthetic::SyntheticSource;
pub use universe::{StaticUniverse, UniverseError, UniverseProvider};
