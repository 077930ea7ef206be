use crate::error::ForecastError;
use crate::matrix::{feature_matrix, target_vector};
use crate::regressor::{Regressor, RidgeRegressor};
use log::info;
use ndarray::Axis;
use polars::prelude::*;

/// Raw bar fields used as model inputs when no explicit list is configured.
pub fn default_features() -> Vec<String> {
    ["open", "high", "low", "close", "change", "pct_chg", "vol", "amount"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// One independently-fit regressor per forecast day. The horizon-i model
/// pairs row r's same-day features with the percentage change realized
/// i days later (`pct_chg<i>`), so feeding the newest row's features
/// yields a prediction for exactly i trading days ahead.
pub struct HorizonModelSet {
    features: Vec<String>,
    predict_days: usize,
    models: Vec<RidgeRegressor>,
}

impl HorizonModelSet {
    pub fn new(features: Vec<String>, predict_days: usize, lambda: f64) -> Self {
        let models = (0..predict_days).map(|_| RidgeRegressor::new(lambda)).collect();
        Self {
            features,
            predict_days,
            models,
        }
    }

    /// Fit every horizon from the derived table. For horizon `i` the usable
    /// rows are `i..rows-1`: the newest `i` rows hold sentinel targets, and
    /// the oldest row is the table's sentinel boundary. Rows whose features
    /// are still in an indicator warm-up window (NaN) are dropped per
    /// horizon.
    pub fn train(&mut self, table: &DataFrame) -> Result<(), ForecastError> {
        let rows = table.height();
        if rows < self.predict_days + 2 {
            return Err(ForecastError::InsufficientRows {
                rows,
                predict_days: self.predict_days,
            });
        }

        let x_all = feature_matrix(table, &self.features)?;

        for i in 1..=self.predict_days {
            let y_all = target_vector(table, &format!("pct_chg{i}"))?;

            let usable: Vec<usize> = (i..rows - 1)
                .filter(|&r| x_all.row(r).iter().all(|v| v.is_finite()) && y_all[r].is_finite())
                .collect();
            if usable.is_empty() {
                return Err(ForecastError::NoTrainingRows);
            }

            let x = x_all.select(Axis(0), &usable);
            let y = y_all.select(Axis(0), &usable);
            info!("training pct_chg{} on {} rows", i, usable.len());
            self.models[i - 1].fit(x.view(), y.view())?;
        }
        Ok(())
    }

    /// Predicted percentage change for each of the next `predict_days`
    /// trading days, fed from the newest row's unlagged features.
    pub fn predict_next(&self, table: &DataFrame) -> Result<Vec<f64>, ForecastError> {
        let current = feature_matrix(&table.slice(0, 1), &self.features)?;
        for (j, name) in self.features.iter().enumerate() {
            if !current[[0, j]].is_finite() {
                return Err(ForecastError::NonFinitePredictionRow(name.clone()));
            }
        }

        let mut changes = Vec::with_capacity(self.models.len());
        for model in &self.models {
            let predicted = model.predict(current.view())?;
            changes.push(predicted[0]);
        }
        Ok(changes)
    }
}

/// Compound the predicted percentage changes into a projected close path,
/// starting from the most recent close.
pub fn project_closes(last_close: f64, pct_changes: &[f64]) -> Vec<f64> {
    let mut closes = Vec::with_capacity(pct_changes.len());
    let mut prev = last_close;
    for chg in pct_changes {
        prev *= 1.0 + chg / 100.0;
        closes.push(prev);
    }
    closes
}
