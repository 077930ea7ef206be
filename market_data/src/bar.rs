use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of a single instrument. Field names follow the provider's
/// daily-bar schema and double as the CSV header and DataFrame column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 8-digit YYYYMMDD key, also the ordering key of the series.
    pub trade_date: u32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub change: f64,
    pub pct_chg: f64,
    pub vol: f64,
    pub amount: f64,
}

impl Bar {
    /// Calendar date of this bar, `None` when `trade_date` is not a valid
    /// YYYYMMDD value.
    pub fn date(&self) -> Option<NaiveDate> {
        let year = (self.trade_date / 10_000) as i32;
        let month = self.trade_date / 100 % 100;
        let day = self.trade_date % 100;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Encode a calendar date back into the 8-digit YYYYMMDD key.
pub fn date_key(date: NaiveDate) -> u32 {
    use chrono::Datelike;
    date.year() as u32 * 10_000 + date.month() * 100 + date.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_round_trips_through_key() {
        let bar = Bar {
            trade_date: 20240131,
            ..Bar::default()
        };
        let date = bar.date().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(date_key(date), 20240131);
    }

    #[test]
    fn invalid_date_key_is_rejected() {
        let bar = Bar {
            trade_date: 20241341,
            ..Bar::default()
        };
        assert!(bar.date().is_none());
    }
}
