//! Fetch, flatten and upload one symbol's metric series

use anyhow::Result;
use shared::convert::{assemble_composite, Flatten};
use shared::{Config, DocStore, QuoteClient, Uploader};
use tracing::info;

/// Metric kinds the pipeline can ingest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Daily,
    Sma,
    Ema,
    Vwap,
    Composite,
}

impl MetricKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" | "ohlcv" => Some(Self::Daily),
            "sma" => Some(Self::Sma),
            "ema" => Some(Self::Ema),
            "vwap" => Some(Self::Vwap),
            "composite" => Some(Self::Composite),
            _ => None,
        }
    }
}

/// Wires the quote client to the bounded uploader.
pub struct Pipeline {
    quotes: QuoteClient,
    uploader: Uploader,
}

impl Pipeline {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            quotes: QuoteClient::new(&config.stock_data)?,
            uploader: Uploader::new(DocStore::new(config.store.url.clone())?),
        })
    }

    /// Daily OHLCV bars into `<index_name><seq>` documents.
    pub async fn ingest_daily(
        &self,
        symbol: &str,
        index_name: &str,
        concurrency: usize,
    ) -> Result<()> {
        let series = self.quotes.daily_series(symbol).await?;
        let records = series.flatten();
        info!(symbol, records = records.len(), index_name, "uploading daily series");
        self.uploader.upload(&records, index_name, concurrency).await?;
        Ok(())
    }

    /// One SMA window. The window suffix of `index_name` relabels the
    /// generic average field in each document.
    pub async fn ingest_sma(
        &self,
        symbol: &str,
        window: usize,
        index_name: &str,
        concurrency: usize,
    ) -> Result<()> {
        let series = self.quotes.simple_moving_average(symbol, window).await?;
        let records = series.flatten();
        info!(symbol, window, records = records.len(), index_name, "uploading SMA series");
        self.uploader
            .upload_windowed(&records, index_name, concurrency)
            .await?;
        Ok(())
    }

    /// One EMA window.
    pub async fn ingest_ema(
        &self,
        symbol: &str,
        window: usize,
        index_name: &str,
        concurrency: usize,
    ) -> Result<()> {
        let series = self.quotes.exponential_moving_average(symbol, window).await?;
        let records = series.flatten();
        info!(symbol, window, records = records.len(), index_name, "uploading EMA series");
        self.uploader.upload(&records, index_name, concurrency).await?;
        Ok(())
    }

    /// Volume-weighted average price series.
    pub async fn ingest_vwap(
        &self,
        symbol: &str,
        index_name: &str,
        concurrency: usize,
    ) -> Result<()> {
        let series = self.quotes.volume_weighted_average_price(symbol).await?;
        let records = series.flatten();
        info!(symbol, records = records.len(), index_name, "uploading VWAP series");
        self.uploader.upload(&records, index_name, concurrency).await?;
        Ok(())
    }

    /// OHLCV joined with two SMA windows into one composite index.
    pub async fn ingest_composite(
        &self,
        symbol: &str,
        short_window: usize,
        long_window: usize,
        index_name: &str,
        concurrency: usize,
    ) -> Result<()> {
        let daily = self.quotes.daily_series(symbol).await?;
        let sma_long = self.quotes.simple_moving_average(symbol, long_window).await?;
        let sma_short = self.quotes.simple_moving_average(symbol, short_window).await?;

        let records = assemble_composite(&daily, &sma_long, &sma_short);
        info!(symbol, records = records.len(), index_name, "uploading composite series");
        self.uploader.upload(&records, index_name, concurrency).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_kind_from_str() {
        assert_eq!(MetricKind::from_str("daily"), Some(MetricKind::Daily));
        assert_eq!(MetricKind::from_str("OHLCV"), Some(MetricKind::Daily));
        assert_eq!(MetricKind::from_str("sma"), Some(MetricKind::Sma));
        assert_eq!(MetricKind::from_str("Composite"), Some(MetricKind::Composite));
        assert_eq!(MetricKind::from_str("ticks"), None);
    }
}
