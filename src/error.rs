use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("No exchange rate for currency: {0}")]
    MissingRate(String),
    #[error("Exchange rate for {currency} is not a finite number: {value}")]
    InvalidRate { currency: String, value: f64 },

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),
    #[error("Refusing to run a statement that is not read-only: {0}")]
    MutatingQuery(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Sqlite Error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
