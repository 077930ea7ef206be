use crate::error::FeatureError;
use crate::lag::{add_lag_columns, column_values};
use polars::prelude::*;
use rayon::prelude::*;

/// Which side of the slow average the fast one is on. Ties count as Above:
/// the seed and every transition test use `>=`, never `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Above,
    Below,
}

fn side_of(fast: f64, slow: f64) -> Side {
    if fast >= slow { Side::Above } else { Side::Below }
}

/// Walk the pair chronologically carrying the current side, emitting +1 on
/// the row where the fast average first reaches the slow one from below,
/// -1 on the row where it first drops under, 0 everywhere else. The oldest
/// row seeds the side by direct comparison and never emits a transition.
pub fn crossover_signal(fast: &[f64], slow: &[f64]) -> Result<Vec<f64>, FeatureError> {
    if fast.len() < 2 || slow.len() < 2 {
        return Err(FeatureError::StateSeedAmbiguous {
            rows: fast.len().min(slow.len()),
        });
    }

    let mut out = Vec::with_capacity(fast.len());
    out.push(0.0);
    let walk = fast
        .iter()
        .zip(slow)
        .skip(1)
        .scan(side_of(fast[0], slow[0]), |side, (&f, &s)| {
            let now = side_of(f, s);
            let signal = match (*side, now) {
                (Side::Below, Side::Above) => 1.0,
                (Side::Above, Side::Below) => -1.0,
                _ => 0.0,
            };
            *side = now;
            Some(signal)
        });
    out.extend(walk);
    Ok(out)
}

/// Attach `cross<fast>-<slow>` for every EMA pair, plus their `pre_*` lags.
/// Pairs are independent and run in parallel; the walk inside one pair is
/// inherently sequential.
pub fn add_crossovers(df: &mut DataFrame, pairs: &[(usize, usize)]) -> Result<(), FeatureError> {
    let mut inputs = Vec::with_capacity(pairs.len());
    for &(fast, slow) in pairs {
        let fast_values = column_values(df, &format!("ema{fast}"))?;
        let slow_values = column_values(df, &format!("ema{slow}"))?;
        inputs.push((format!("cross{fast}-{slow}"), fast_values, slow_values));
    }

    let columns = inputs
        .par_iter()
        .map(|(name, fast_values, slow_values)| {
            // the stored columns are newest-first, the walk is chronological
            let fast: Vec<f64> = fast_values.iter().rev().copied().collect();
            let slow: Vec<f64> = slow_values.iter().rev().copied().collect();
            let mut signal = crossover_signal(&fast, &slow)?;
            signal.reverse();
            Ok(Series::new(name, signal))
        })
        .collect::<Result<Vec<Series>, FeatureError>>()?;

    let mut names = Vec::with_capacity(columns.len());
    for column in columns {
        names.push(column.name().to_string());
        df.with_column(column)?;
    }
    add_lag_columns(df, &names)
}
