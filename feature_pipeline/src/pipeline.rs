use crate::config::FeatureConfig;
use crate::crossover::add_crossovers;
use crate::error::FeatureError;
use crate::lag::{RAW_FIELDS, add_lag_columns};
use crate::momentum::add_momentum;
use crate::moving_average::add_moving_averages;
use crate::target::add_targets;
use log::debug;
use market_data::store::SCHEMA;
use polars::prelude::*;

/// Derive the full feature/target table from a raw newest-first bar frame.
/// Transforms only ever attach columns: rows are never dropped, reordered
/// or mutated, so the output has exactly the input's height.
pub fn derive(df: &DataFrame, config: &FeatureConfig) -> Result<DataFrame, FeatureError> {
    validate_input(df)?;

    let mut table = df.clone();
    add_lag_columns(&mut table, &RAW_FIELDS)?;
    add_moving_averages(&mut table, &config.ma_windows)?;
    add_momentum(&mut table, &config.rsi_lookbacks)?;
    add_crossovers(&mut table, &config.crossover_pairs())?;
    add_targets(&mut table, config.predict_days)?;

    debug!(
        "derived {} columns over {} rows",
        table.width(),
        table.height()
    );
    Ok(table)
}

/// MalformedInput checks, run before any transform: required columns exist
/// and trade_date is strictly decreasing (newest-first) with no duplicates.
fn validate_input(df: &DataFrame) -> Result<(), FeatureError> {
    for name in SCHEMA {
        if df.column(name).is_err() {
            return Err(FeatureError::MissingColumn(name.to_string()));
        }
    }

    let dates = df.column("trade_date")?.i64()?;
    let mut prev: Option<i64> = None;
    for (row, date) in dates.into_iter().enumerate() {
        let date = date.ok_or_else(|| FeatureError::MissingColumn("trade_date".to_string()))?;
        if let Some(prev) = prev {
            if date == prev {
                return Err(FeatureError::DuplicateDate { row, date });
            }
            if date > prev {
                return Err(FeatureError::NonMonotonicDates { row, prev, date });
            }
        }
        prev = Some(date);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lag::column_values;
    use market_data::bar::Bar;
    use market_data::store::to_dataframe;

    fn flat_bars(len: usize) -> Vec<Bar> {
        (0..len)
            .map(|r| Bar {
                trade_date: 20240131 - r as u32,
                open: 10.0,
                high: 10.0,
                low: 10.0,
                close: 10.0,
                change: 0.0,
                pct_chg: r as f64,
                vol: 1000.0,
                amount: 10_000.0,
            })
            .collect()
    }

    fn config(predict_days: usize) -> FeatureConfig {
        FeatureConfig {
            predict_days,
            ..FeatureConfig::default()
        }
    }

    #[test]
    fn row_count_is_invariant() {
        for len in [2usize, 5, 10, 40] {
            let df = to_dataframe(&flat_bars(len)).unwrap();
            let table = derive(&df, &config(3)).unwrap();
            assert_eq!(table.height(), len);
        }
    }

    #[test]
    fn missing_column_fails_before_transforms() {
        let df = DataFrame::new(vec![Series::new("close", vec![10.0, 9.0])]).unwrap();
        let err = derive(&df, &config(3)).unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn(_)));
    }

    #[test]
    fn increasing_dates_are_rejected() {
        let mut bars = flat_bars(3);
        bars.reverse();
        let df = to_dataframe(&bars).unwrap();
        let err = derive(&df, &config(3)).unwrap_err();
        assert!(matches!(err, FeatureError::NonMonotonicDates { .. }));
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let mut bars = flat_bars(3);
        bars[2].trade_date = bars[1].trade_date;
        let df = to_dataframe(&bars).unwrap();
        let err = derive(&df, &config(3)).unwrap_err();
        assert!(matches!(err, FeatureError::DuplicateDate { row: 2, .. }));
    }

    #[test]
    fn single_row_cannot_seed_crossovers() {
        let df = to_dataframe(&flat_bars(1)).unwrap();
        let err = derive(&df, &config(3)).unwrap_err();
        assert!(matches!(err, FeatureError::StateSeedAmbiguous { rows: 1 }));
    }

    // ten flat bars, predict_days = 3: the worked example of the contract
    #[test]
    fn flat_series_end_to_end() {
        let df = to_dataframe(&flat_bars(10)).unwrap();
        let table = derive(&df, &config(3)).unwrap();
        assert_eq!(table.height(), 10);

        // sma5 defined for the six rows with a full trailing window
        let sma5 = column_values(&table, "sma5").unwrap();
        for r in 0..=5 {
            assert_eq!(sma5[r], 10.0);
        }
        for r in 6..10 {
            assert!(sma5[r].is_nan());
        }

        // flat closes: every defined RSI sits at the neutral 50
        for n in [2usize, 3, 4, 5, 6] {
            let values = column_values(&table, &format!("rsi{n}")).unwrap();
            for r in 0..10 - n {
                assert_eq!(values[r], 50.0);
            }
        }

        // fast EMA equals slow EMA everywhere: seeded Above, no transitions
        let cross = column_values(&table, "cross5-10").unwrap();
        assert_eq!(cross, vec![0.0; 10]);

        // target alignment at horizon 1
        let pct_chg = column_values(&table, "pct_chg").unwrap();
        let pct_chg1 = column_values(&table, "pct_chg1").unwrap();
        assert_eq!(pct_chg1[5], pct_chg[4]);
        assert_eq!(pct_chg1[0], 0.0);

        // lag correctness on a raw field
        let close = column_values(&table, "close").unwrap();
        let pre_close = column_values(&table, "pre_close").unwrap();
        for r in 0..9 {
            assert_eq!(pre_close[r], close[r + 1]);
        }
        assert_eq!(pre_close[9], 0.0);
    }

    #[test]
    fn derived_column_set_is_complete() {
        let df = to_dataframe(&flat_bars(12)).unwrap();
        let cfg = config(2);
        let table = derive(&df, &cfg).unwrap();

        for name in [
            "pre_open",
            "pre_amount",
            "sma200",
            "ema200",
            "pre_sma200",
            "pre_ema5",
            "rsi6",
            "pre_rsi2",
            "cross5-200",
            "cross50-100",
            "pre_cross5-10",
            "pre_cross50-100",
            "pct_chg1",
            "pct_chg2",
        ] {
            assert!(table.column(name).is_ok(), "missing column {name}");
        }
    }
}
