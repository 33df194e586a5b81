//! Largest banks ETL.
//! Scrapes the market capitalization table, converts it to GBP, EUR and INR,
//! stores the result as CSV and in SQLite and runs a few queries against it.

mod error;
pub mod load;
mod macros;
mod parse;
pub mod process;
pub mod progress;
pub mod query;
pub mod record;
pub mod request;
pub mod transform;

use std::path::PathBuf;

pub use error::{Error, Result};
#[doc(hidden)]
pub use macros::elapsed_secs;
pub use parse::{extract, parse_bank_table};
pub use process::{run_etl, EtlReport};
pub use record::{Bank, Currency, EnrichedBank};
pub use request::Source;

pub const PAGE_SOURCE: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";
pub const RATES_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMSkillsNetwork-PY0221EN-Coursera/labs/v2/exchange_rate.csv";
const OUTPUT_CSV_PATH: &str = "./Largest_banks_data.csv";
const DB_PATH: &str = "Banks.db";
const TABLE_NAME: &str = "Largest_banks";
const LOG_FILE_PATH: &str = "code_log.txt";
const QUERIES: [&str; 3] = [
    "SELECT * FROM Largest_banks",
    "SELECT AVG(MarketCap_GBP) FROM Largest_banks",
    "SELECT Name FROM Largest_banks LIMIT 5",
];

/// Inputs and outputs of a pipeline run. `Default` points at the archived page and the
/// published rate table and writes next to the working directory.
#[derive(Debug, Clone)]
pub struct EtlConfig {
    pub page_source: Source,
    pub rates_source: Source,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
    pub table_name: String,
    pub log_path: PathBuf,
    pub queries: Vec<String>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            page_source: Source::from(PAGE_SOURCE),
            rates_source: Source::from(RATES_SOURCE),
            csv_path: OUTPUT_CSV_PATH.into(),
            db_path: DB_PATH.into(),
            table_name: TABLE_NAME.into(),
            log_path: LOG_FILE_PATH.into(),
            queries: QUERIES.iter().map(|q| q.to_string()).collect(),
        }
    }
}
