use crate::error::FeatureError;
use polars::prelude::*;

/// Raw bar fields that get a previous-day (`pre_*`) counterpart.
pub const RAW_FIELDS: [&str; 8] = [
    "open", "high", "low", "close", "change", "pct_chg", "vol", "amount",
];

/// Shift a newest-first column to the previous trading day: `out[r]` is the
/// value one day more historical than row `r`, so `out[r] == values[r + 1]`.
/// The oldest row has no predecessor and gets the 0.0 sentinel.
pub fn lag_values(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len());
    out.extend_from_slice(&values[1..]);
    out.push(0.0);
    out
}

/// Pull a column out as a materialized f64 vector; nulls become NaN.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, FeatureError> {
    let series = df
        .column(name)
        .map_err(|_| FeatureError::MissingColumn(name.to_string()))?;
    let values = series.f64()?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// Attach `pre_<name>` for every listed column.
pub fn add_lag_columns<S: AsRef<str>>(df: &mut DataFrame, names: &[S]) -> Result<(), FeatureError> {
    for name in names {
        let name = name.as_ref();
        let values = column_values(df, name)?;
        df.with_column(Series::new(&format!("pre_{name}"), lag_values(&values)))?;
    }
    Ok(())
}
