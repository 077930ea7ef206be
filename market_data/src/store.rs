use crate::bar::Bar;
use crate::error::MarketDataError;
use log::info;
use polars::prelude::*;
use std::path::Path;

/// Column naming contract shared by the CSV snapshot and the DataFrame.
pub const SCHEMA: [&str; 9] = [
    "trade_date",
    "open",
    "high",
    "low",
    "close",
    "change",
    "pct_chg",
    "vol",
    "amount",
];

/// Read a flat CSV snapshot, newest-first.
pub fn load(path: &Path) -> Result<Vec<Bar>, MarketDataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let bars = reader
        .deserialize()
        .collect::<Result<Vec<Bar>, csv::Error>>()?;
    info!("loaded {} bars from {}", bars.len(), path.display());
    Ok(bars)
}

/// Write the snapshot back, preserving row order and the fixed header.
pub fn save(path: &Path, bars: &[Bar]) -> Result<(), MarketDataError> {
    let mut writer = csv::Writer::from_path(path)?;
    for bar in bars {
        writer.serialize(bar)?;
    }
    writer.flush()?;
    info!("saved {} bars to {}", bars.len(), path.display());
    Ok(())
}

/// Materialize the bar series as a DataFrame, one column per schema field.
/// Row order is preserved, index 0 stays the most recent trading day.
pub fn to_dataframe(bars: &[Bar]) -> PolarsResult<DataFrame> {
    let trade_date: Vec<i64> = bars.iter().map(|b| b.trade_date as i64).collect();
    let open: Vec<f64> = bars.iter().map(|b| b.open).collect();
    let high: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let low: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let change: Vec<f64> = bars.iter().map(|b| b.change).collect();
    let pct_chg: Vec<f64> = bars.iter().map(|b| b.pct_chg).collect();
    let vol: Vec<f64> = bars.iter().map(|b| b.vol).collect();
    let amount: Vec<f64> = bars.iter().map(|b| b.amount).collect();

    DataFrame::new(vec![
        Series::new("trade_date", trade_date),
        Series::new("open", open),
        Series::new("high", high),
        Series::new("low", low),
        Series::new("close", close),
        Series::new("change", change),
        Series::new("pct_chg", pct_chg),
        Series::new("vol", vol),
        Series::new("amount", amount),
    ])
}
