use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Dates not strictly decreasing at row {row}: {date} after {prev}")]
    NonMonotonicDates { row: usize, prev: i64, date: i64 },

    #[error("Duplicate trade_date {date} at row {row}")]
    DuplicateDate { row: usize, date: i64 },

    #[error("Cannot seed crossover state from {rows} rows, need at least 2")]
    StateSeedAmbiguous { rows: usize },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}
