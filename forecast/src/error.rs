use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Missing column {0}")]
    MissingColumn(String),

    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Normal equations are singular; increase the ridge penalty")]
    SingularSystem,

    #[error("Not enough rows to train: {rows} rows for {predict_days} horizons")]
    InsufficientRows { rows: usize, predict_days: usize },

    #[error("No usable training rows after dropping undefined features")]
    NoTrainingRows,

    #[error("Non-finite feature at the prediction row: {0}")]
    NonFinitePredictionRow(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
