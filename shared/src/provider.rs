//! Quote provider client

use crate::config::ProviderConfig;
use crate::models::{DailySeries, EmaSeries, SmaSeries, VwapSeries};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Per-request ceiling for provider queries.
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieval failure, propagated unchanged to the pipeline's caller.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("quote request failed: {0}")]
    Http(reqwest::Error),
    #[error("malformed quote response: {0}")]
    Decode(reqwest::Error),
}

/// Client for the quote provider's query endpoint.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl QuoteClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(QUERY_TIMEOUT)
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    /// Daily OHLCV series for `symbol`.
    pub async fn daily_series(&self, symbol: &str) -> Result<DailySeries, ProviderError> {
        self.query(&[("function", "TIME_SERIES_DAILY"), ("symbol", symbol)])
            .await
    }

    /// Simple moving average of the daily close over `window` periods.
    pub async fn simple_moving_average(
        &self,
        symbol: &str,
        window: usize,
    ) -> Result<SmaSeries, ProviderError> {
        let window = window.to_string();
        self.query(&[
            ("function", "SMA"),
            ("symbol", symbol),
            ("interval", "daily"),
            ("time_period", window.as_str()),
            ("series_type", "close"),
        ])
        .await
    }

    /// Exponential moving average of the daily close over `window` periods.
    pub async fn exponential_moving_average(
        &self,
        symbol: &str,
        window: usize,
    ) -> Result<EmaSeries, ProviderError> {
        let window = window.to_string();
        self.query(&[
            ("function", "EMA"),
            ("symbol", symbol),
            ("interval", "daily"),
            ("time_period", window.as_str()),
            ("series_type", "close"),
        ])
        .await
    }

    /// Volume-weighted average price series for `symbol`.
    pub async fn volume_weighted_average_price(
        &self,
        symbol: &str,
    ) -> Result<VwapSeries, ProviderError> {
        self.query(&[
            ("function", "VWAP"),
            ("symbol", symbol),
            ("interval", "daily"),
        ])
        .await
    }

    async fn query<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/query", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(ProviderError::Http)?;

        response.json::<T>().await.map_err(ProviderError::Decode)
    }
}
