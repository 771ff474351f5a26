use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Best bid/ask for a representative option contract on the instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    pub expiry: NaiveDate,
    pub strike: f64,
    pub bid: f64,
    pub ask: f64,
}

impl OptionQuote {
    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

/// Static descriptive metadata for an equity in the universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMeta {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub optionable: bool,
    #[serde(default)]
    pub next_earnings: Option<NaiveDate>,
    #[serde(default)]
    pub option_quote: Option<OptionQuote>,
}

impl InstrumentMeta {
    /// Metadata with only a symbol and sector; other fields take defaults.
    pub fn new(symbol: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: String::new(),
            sector: sector.into(),
            industry: String::new(),
            optionable: false,
            next_earnings: None,
            option_quote: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_optionable(mut self, optionable: bool) -> Self {
        self.optionable = optionable;
        self
    }

    pub fn with_next_earnings(mut self, date: NaiveDate) -> Self {
        self.next_earnings = Some(date);
        self
    }

    pub fn with_option_quote(mut self, quote: OptionQuote) -> Self {
        self.option_quote = Some(quote);
        self
    }
}
