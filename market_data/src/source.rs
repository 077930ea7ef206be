use crate::bar::{Bar, date_key};
use crate::config::ProviderConfig;
use crate::error::MarketDataError;
use crate::store;
use chrono::{Days, Local, NaiveDate};
use log::info;
use reqwest::Client;
use std::path::Path;

/// Daily-bar supplier. `since` is the watermark `trade_date` of the newest
/// bar already on disk; `None` means full history backfill. Returned rows
/// are newest-first and strictly newer than the watermark.
#[allow(async_fn_in_trait)]
pub trait BarSource {
    async fn fetch(&self, symbol: &str, since: Option<u32>) -> Result<Vec<Bar>, MarketDataError>;
}

/// REST client for a tushare-style daily-bar endpoint.
pub struct HttpBarSource {
    client: Client,
    config: ProviderConfig,
}

impl HttpBarSource {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn fetch_page(
        &self,
        symbol: &str,
        start_date: Option<u32>,
        end_date: u32,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let mut request = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("ts_code", symbol),
                ("token", self.config.token.as_str()),
                ("adj", "qfq"),
            ])
            .query(&[("end_date", end_date.to_string())]);

        if let Some(start) = start_date {
            request = request.query(&[("start_date", start.to_string())]);
        }

        let response = request.send().await?;
        let bars: Vec<Bar> = response.json().await?;
        Ok(bars)
    }

    /// Page backwards from today until the provider runs out of history.
    async fn backfill(&self, symbol: &str) -> Result<Vec<Bar>, MarketDataError> {
        let mut data = Vec::new();
        let mut end_date = date_key(Local::now().date_naive());

        loop {
            let page = self.fetch_page(symbol, None, end_date).await?;
            info!(
                "got page of {} bars for {}, end_date {}",
                page.len(),
                symbol,
                end_date
            );
            if page.is_empty() {
                break;
            }

            let oldest = page[page.len() - 1].trade_date;
            let page_len = page.len();
            data.extend(page);

            if page_len < self.config.page_size {
                break;
            }
            end_date = date_key(previous_day(oldest)?);
        }

        if data.is_empty() {
            return Err(MarketDataError::NoProviderData(symbol.to_string()));
        }
        Ok(data)
    }

    /// Fetch only the bars that post-date the snapshot watermark.
    async fn fetch_since(
        &self,
        symbol: &str,
        watermark: u32,
    ) -> Result<Vec<Bar>, MarketDataError> {
        let start = date_key(next_day(watermark)?);
        let end = date_key(Local::now().date_naive());
        let mut page = self.fetch_page(symbol, Some(start), end).await?;
        page.retain(|bar| bar.trade_date > watermark);
        info!("extend data length: {}", page.len());
        Ok(page)
    }
}

impl BarSource for HttpBarSource {
    async fn fetch(&self, symbol: &str, since: Option<u32>) -> Result<Vec<Bar>, MarketDataError> {
        match since {
            Some(watermark) => self.fetch_since(symbol, watermark).await,
            None => self.backfill(symbol).await,
        }
    }
}

fn parse_key(key: u32) -> Result<NaiveDate, MarketDataError> {
    Bar {
        trade_date: key,
        ..Bar::default()
    }
    .date()
    .ok_or(MarketDataError::MalformedDate(key))
}

fn next_day(key: u32) -> Result<NaiveDate, MarketDataError> {
    parse_key(key)?
        .checked_add_days(Days::new(1))
        .ok_or(MarketDataError::MalformedDate(key))
}

fn previous_day(key: u32) -> Result<NaiveDate, MarketDataError> {
    parse_key(key)?
        .checked_sub_days(Days::new(1))
        .ok_or(MarketDataError::MalformedDate(key))
}

/// Load the snapshot if present, pull anything newer from the source,
/// prepend it (rows stay newest-first) and write the snapshot back.
pub async fn sync_snapshot<S: BarSource>(
    path: &Path,
    source: &S,
    symbol: &str,
) -> Result<Vec<Bar>, MarketDataError> {
    let saved = if path.exists() {
        store::load(path)?
    } else {
        Vec::new()
    };
    let watermark = saved.first().map(|bar| bar.trade_date);

    let mut bars = source.fetch(symbol, watermark).await?;
    bars.extend(saved);
    store::save(path, &bars)?;
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource {
        fresh: Vec<Bar>,
    }

    impl BarSource for FixedSource {
        async fn fetch(
            &self,
            _symbol: &str,
            since: Option<u32>,
        ) -> Result<Vec<Bar>, MarketDataError> {
            let mut bars = self.fresh.clone();
            if let Some(watermark) = since {
                bars.retain(|bar| bar.trade_date > watermark);
            }
            Ok(bars)
        }
    }

    fn bar(trade_date: u32) -> Bar {
        Bar {
            trade_date,
            close: trade_date as f64,
            ..Bar::default()
        }
    }

    #[tokio::test]
    async fn sync_prepends_only_newer_bars() {
        let path = std::env::temp_dir().join(format!("sync_{}.csv", std::process::id()));
        store::save(&path, &[bar(20240102), bar(20240101)]).unwrap();

        let source = FixedSource {
            fresh: vec![bar(20240104), bar(20240103), bar(20240102)],
        };
        let merged = sync_snapshot(&path, &source, "000519.SZ").await.unwrap();
        std::fs::remove_file(&path).ok();

        let dates: Vec<u32> = merged.iter().map(|b| b.trade_date).collect();
        assert_eq!(dates, vec![20240104, 20240103, 20240102, 20240101]);
    }

    #[tokio::test]
    async fn sync_backfills_when_no_snapshot() {
        let path = std::env::temp_dir().join(format!("backfill_{}.csv", std::process::id()));
        std::fs::remove_file(&path).ok();

        let source = FixedSource {
            fresh: vec![bar(20240103), bar(20240102)],
        };
        let merged = sync_snapshot(&path, &source, "000519.SZ").await.unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn day_arithmetic_crosses_month_boundaries() {
        assert_eq!(next_day(20240131).unwrap(), parse_key(20240201).unwrap());
        assert_eq!(previous_day(20240301).unwrap(), parse_key(20240229).unwrap());
    }
}
