//! Domain types: bars, series, instrument metadata.

pub mod bar;
pub mod instrument;

pub use bar::{PriceBar, PriceSeries, SeriesError};
pub use instrument::{InstrumentMeta, OptionQuote};
