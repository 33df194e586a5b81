use serde::{Deserialize, Serialize};

/// Column names shared by the CSV output and the database table.
pub const COLUMNS: [&str; 5] = [
    "Name",
    "MarketCap_USD",
    "MarketCap_GBP",
    "MarketCap_EUR",
    "MarketCap_INR",
];

/// A row of the scraped table: a bank and its market capitalization in USD billion.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    pub name: String,
    pub market_cap_usd: f64,
}

impl Bank {
    pub fn new(name: impl Into<String>, market_cap_usd: f64) -> Self {
        Self {
            name: name.into(),
            market_cap_usd,
        }
    }
}

/// A `Bank` with its market cap converted to every target currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBank {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MarketCap_USD")]
    pub market_cap_usd: f64,
    #[serde(rename = "MarketCap_GBP")]
    pub market_cap_gbp: f64,
    #[serde(rename = "MarketCap_EUR")]
    pub market_cap_eur: f64,
    #[serde(rename = "MarketCap_INR")]
    pub market_cap_inr: f64,
}

/// Currencies every record is converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Gbp,
    Eur,
    Inr,
}

impl Currency {
    /// ISO code as it appears in the rate table.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
        }
    }
}
