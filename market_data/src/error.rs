use config;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config not found: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Empty bar series")]
    EmptySeries,

    #[error("Malformed trade_date {0}, expected YYYYMMDD")]
    MalformedDate(u32),

    #[error("Dates not strictly decreasing at row {row}: {date} after {prev}")]
    NonMonotonicDates { row: usize, prev: u32, date: u32 },

    #[error("Duplicate trade_date {date} at row {row}")]
    DuplicateDate { row: usize, date: u32 },

    #[error("Non-finite or negative {field} at row {row}")]
    InvalidField { row: usize, field: &'static str },

    #[error("Provider returned no rows for {0}")]
    NoProviderData(String),
}
