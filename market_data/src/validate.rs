use crate::bar::Bar;
use crate::error::MarketDataError;
use log::warn;

/// Fail-fast checks on the raw series before any feature transform runs:
/// newest-first strictly decreasing dates, no duplicates, sane prices.
pub fn validate_bars(bars: &[Bar]) -> Result<(), MarketDataError> {
    if bars.is_empty() {
        return Err(MarketDataError::EmptySeries);
    }

    for (row, bar) in bars.iter().enumerate() {
        if bar.date().is_none() {
            warn!("row {} has malformed trade_date {}", row, bar.trade_date);
            return Err(MarketDataError::MalformedDate(bar.trade_date));
        }

        for (field, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
            ("vol", bar.vol),
            ("amount", bar.amount),
        ] {
            if !value.is_finite() || value < 0.0 {
                warn!("row {} has invalid {}: {}", row, field, value);
                return Err(MarketDataError::InvalidField { row, field });
            }
        }

        if row > 0 {
            let prev = bars[row - 1].trade_date;
            if bar.trade_date == prev {
                return Err(MarketDataError::DuplicateDate {
                    row,
                    date: bar.trade_date,
                });
            }
            if bar.trade_date > prev {
                return Err(MarketDataError::NonMonotonicDates {
                    row,
                    prev,
                    date: bar.trade_date,
                });
            }
        }
    }

    Ok(())
}
