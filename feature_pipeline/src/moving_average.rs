use crate::error::FeatureError;
use crate::lag::{add_lag_columns, column_values};
use polars::prelude::*;

/// Trailing simple moving average over `window` chronological observations.
/// NaN for the first `window - 1` observations; insufficient history is not
/// backfilled.
pub fn sma(prices: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; prices.len()];
    let mut sum = 0.0;
    for (t, &price) in prices.iter().enumerate() {
        sum += price;
        if t >= window {
            sum -= prices[t - window];
        }
        if t + 1 >= window {
            out[t] = sum / window as f64;
        }
    }
    out
}

/// Exponential moving average, `ema(t) = price(t)*a + ema(t-1)*(1-a)` with
/// `a = 2/(window+1)`, seeded from the first chronological price. The seed
/// choice makes the column defined at every row, which the crossover
/// transform relies on.
pub fn ema(prices: &[f64], window: usize) -> Vec<f64> {
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len());
    let mut prev = match prices.first() {
        Some(&price) => price,
        None => return out,
    };
    out.push(prev);
    for &price in &prices[1..] {
        prev = price * alpha + prev * (1.0 - alpha);
        out.push(prev);
    }
    out
}

/// Attach `sma<w>`/`ema<w>` for every window, plus their `pre_*` lags.
pub fn add_moving_averages(df: &mut DataFrame, windows: &[usize]) -> Result<(), FeatureError> {
    let close = column_values(df, "close")?;
    // rows are newest-first; the averages walk in true chronological order
    let chronological: Vec<f64> = close.iter().rev().copied().collect();

    for &window in windows {
        let mut simple = sma(&chronological, window);
        simple.reverse();
        let mut exponential = ema(&chronological, window);
        exponential.reverse();
        df.with_column(Series::new(&format!("sma{window}"), simple))?;
        df.with_column(Series::new(&format!("ema{window}"), exponential))?;
    }

    let derived: Vec<String> = windows
        .iter()
        .flat_map(|w| [format!("sma{w}"), format!("ema{w}")])
        .collect();
    add_lag_columns(df, &derived)
}
