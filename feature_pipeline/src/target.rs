use crate::error::FeatureError;
use crate::lag::column_values;
use polars::prelude::*;

/// Attach the forward targets: `pct_chg<i>[r]` is the percentage change
/// realized `i` trading days after row `r`, i.e. the `pct_chg` of the row
/// `i` positions closer to the newest edge. The newest `i` rows have no
/// realized value yet and hold the 0.0 sentinel; callers must slice them
/// out before fitting.
pub fn add_targets(df: &mut DataFrame, predict_days: usize) -> Result<(), FeatureError> {
    let pct_chg = column_values(df, "pct_chg")?;
    let rows = pct_chg.len();

    for i in 1..=predict_days {
        let mut target = vec![0.0; rows];
        for r in i..rows {
            target[r] = pct_chg[r - i];
        }
        df.with_column(Series::new(&format!("pct_chg{i}"), target))?;
    }
    Ok(())
}
