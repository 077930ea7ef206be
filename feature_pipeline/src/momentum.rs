use crate::error::FeatureError;
use crate::lag::{add_lag_columns, column_values};
use polars::prelude::*;

/// Relative strength index over a trailing `lookback` of chronological price
/// deltas, smoothed with a simple trailing mean (not Wilder's recurrence).
/// NaN for the first `lookback` observations. A window with no down-moves
/// saturates at 100; a completely flat window is neutral at 50.
pub fn rsi(prices: &[f64], lookback: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; prices.len()];
    let mut moves = Vec::with_capacity(prices.len());
    moves.push((0.0, 0.0));
    let mut up_sum = 0.0;
    let mut down_sum = 0.0;

    for t in 1..prices.len() {
        let delta = prices[t] - prices[t - 1];
        let up = delta.max(0.0);
        let down = (-delta).max(0.0);
        moves.push((up, down));
        up_sum += up;
        down_sum += down;

        if t > lookback {
            let (old_up, old_down) = moves[t - lookback];
            up_sum -= old_up;
            down_sum -= old_down;
        }
        if t >= lookback {
            out[t] = rsi_value(up_sum, down_sum);
        }
    }
    out
}

// The up/down averages share the lookback divisor, so raw sums suffice.
fn rsi_value(up_sum: f64, down_sum: f64) -> f64 {
    if down_sum == 0.0 {
        return if up_sum == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = up_sum / down_sum;
    100.0 - 100.0 / (1.0 + rs)
}

/// Attach `rsi<n>` for every lookback, plus their `pre_*` lags.
pub fn add_momentum(df: &mut DataFrame, lookbacks: &[usize]) -> Result<(), FeatureError> {
    let close = column_values(df, "close")?;
    let chronological: Vec<f64> = close.iter().rev().copied().collect();

    for &lookback in lookbacks {
        let mut values = rsi(&chronological, lookback);
        values.reverse();
        df.with_column(Series::new(&format!("rsi{lookback}"), values))?;
    }

    let derived: Vec<String> = lookbacks.iter().map(|n| format!("rsi{n}")).collect();
    add_lag_columns(df, &derived)
}
