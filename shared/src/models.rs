//! Provider wire models and flat per-date records
//!
//! The quote provider keys every metric by date string (`YYYY-MM-DD`) and
//! encodes numeric values as JSON strings under numbered field labels.
//! Nothing about the wire maps guarantees ordering; consumers that need
//! chronological order must call [`sort_by_date`] explicitly.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Decode the provider's string-encoded numerics (e.g. `"150.42"`).
fn f32_from_str<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<f32>().map_err(serde::de::Error::custom)
}

/// Metadata block of a daily time-series response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailyMeta {
    #[serde(rename = "1. Information")]
    pub information: String,
    #[serde(rename = "2. Symbol")]
    pub symbol: String,
    #[serde(rename = "3. Last Refreshed")]
    pub last_refreshed: String,
    #[serde(rename = "4. Interval String")]
    pub interval: String,
    #[serde(rename = "5. Output Size")]
    pub output_size: String,
    #[serde(rename = "6. Time Zone")]
    pub timezone: String,
}

/// One day's OHLCV quintuple as the provider sends it
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open", deserialize_with = "f32_from_str")]
    pub open: f32,
    #[serde(rename = "2. high", deserialize_with = "f32_from_str")]
    pub high: f32,
    #[serde(rename = "3. low", deserialize_with = "f32_from_str")]
    pub low: f32,
    #[serde(rename = "4. close", deserialize_with = "f32_from_str")]
    pub close: f32,
    #[serde(rename = "5. volume", deserialize_with = "f32_from_str")]
    pub volume: f32,
}

/// Daily OHLCV series response: metadata plus an unordered date-keyed map
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailySeries {
    #[serde(rename = "Meta Data")]
    pub meta: DailyMeta,
    #[serde(rename = "Time Series (Daily)")]
    pub data: HashMap<String, DailyBar>,
}

/// Metadata block shared by the moving-average indicator responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IndicatorMeta {
    #[serde(rename = "1: Symbol")]
    pub symbol: String,
    #[serde(rename = "2: Indicator")]
    pub indicator: String,
    #[serde(rename = "3: Last Refreshed")]
    pub last_refreshed: String,
    #[serde(rename = "4: Interval")]
    pub interval: String,
    #[serde(rename = "5: Time Period")]
    pub time_period: u32,
    #[serde(rename = "6: Series Type")]
    pub series_type: String,
    #[serde(rename = "7: Time Zone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SmaPoint {
    #[serde(rename = "SMA", deserialize_with = "f32_from_str")]
    pub value: f32,
}

/// Simple moving average response for one window length
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SmaSeries {
    #[serde(rename = "Meta Data")]
    pub meta: IndicatorMeta,
    #[serde(rename = "Technical Analysis: SMA")]
    pub data: HashMap<String, SmaPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmaPoint {
    #[serde(rename = "EMA", deserialize_with = "f32_from_str")]
    pub value: f32,
}

/// Exponential moving average response for one window length
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmaSeries {
    #[serde(rename = "Meta Data")]
    pub meta: IndicatorMeta,
    #[serde(rename = "Technical Analysis: EMA")]
    pub data: HashMap<String, EmaPoint>,
}

/// Metadata block of a volume-weighted average price response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VwapMeta {
    #[serde(rename = "1: Symbol")]
    pub symbol: String,
    #[serde(rename = "2: Indicator")]
    pub indicator: String,
    #[serde(rename = "3: Last Refreshed")]
    pub last_refreshed: String,
    #[serde(rename = "4: Interval")]
    pub interval: String,
    #[serde(rename = "5: Time Zone")]
    pub timezone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VwapPoint {
    #[serde(rename = "VWAP", deserialize_with = "f32_from_str")]
    pub value: f32,
}

/// Volume-weighted average price response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VwapSeries {
    #[serde(rename = "Meta Data")]
    pub meta: VwapMeta,
    #[serde(rename = "Technical Analysis: VWAP")]
    pub data: HashMap<String, VwapPoint>,
}

/// One date's OHLCV values materialized as a standalone document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: String,
    pub open: f32,
    pub high: f32,
    pub low: f32,
    pub close: f32,
    pub volume: f32,
}

/// One date's simple moving average value
///
/// The `sma` field name is generic across window lengths; uploads that
/// target a window-specific index relabel it, see [`crate::relabel`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmaRecord {
    pub date: String,
    pub sma: f32,
}

/// One date's exponential moving average value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmaRecord {
    pub date: String,
    pub ema: f32,
}

/// One date's volume-weighted average price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VwapRecord {
    pub date: String,
    pub vwap: f32,
}

/// OHLCV record joined with two simple-moving-average windows
///
/// Fields not needed downstream (the provider metadata) are already
/// stripped; a date missing from either average series carries `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeRecord {
    pub date: String,
    pub open: f32,
    pub close: f32,
    pub high: f32,
    pub low: f32,
    pub volume: f32,
    pub sma_50_day: f32,
    pub sma_15_day: f32,
}

/// Anything carrying a `YYYY-MM-DD` date key.
pub trait Dated {
    fn date(&self) -> &str;
}

impl Dated for DailyRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for SmaRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for EmaRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for VwapRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

impl Dated for CompositeRecord {
    fn date(&self) -> &str {
        &self.date
    }
}

/// Sort records chronologically by date key (oldest first).
///
/// Conversion leaves records in map iteration order; call this before any
/// consumer that needs chronology. Unparseable dates sort first.
pub fn sort_by_date<T: Dated>(records: &mut [T]) {
    records.sort_by_key(|r| NaiveDate::parse_from_str(r.date(), "%Y-%m-%d").ok());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_series_decodes_wire_shape() {
        let raw = r#"{
            "Meta Data": {
                "1. Information": "Daily Prices",
                "2. Symbol": "MSFT",
                "3. Last Refreshed": "2024-01-03",
                "4. Interval String": "Daily",
                "5. Output Size": "Compact",
                "6. Time Zone": "US/Eastern"
            },
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "10.0",
                    "2. high": "12.0",
                    "3. low": "9.0",
                    "4. close": "11.0",
                    "5. volume": "1000"
                }
            }
        }"#;

        let series: DailySeries = serde_json::from_str(raw).unwrap();
        assert_eq!(series.meta.symbol, "MSFT");
        let bar = series.data.get("2024-01-02").unwrap();
        assert_eq!(bar.open, 10.0);
        assert_eq!(bar.close, 11.0);
        assert_eq!(bar.volume, 1000.0);
    }

    #[test]
    fn test_sma_series_decodes_wire_shape() {
        let raw = r#"{
            "Meta Data": {
                "1: Symbol": "MSFT",
                "2: Indicator": "Simple Moving Average (SMA)",
                "3: Last Refreshed": "2024-01-03",
                "4: Interval": "daily",
                "5: Time Period": 15,
                "6: Series Type": "close",
                "7: Time Zone": "US/Eastern"
            },
            "Technical Analysis: SMA": {
                "2024-01-02": { "SMA": "150.4200" }
            }
        }"#;

        let series: SmaSeries = serde_json::from_str(raw).unwrap();
        assert_eq!(series.meta.time_period, 15);
        assert_eq!(series.data.get("2024-01-02").unwrap().value, 150.42);
    }

    #[test]
    fn test_non_numeric_value_is_rejected() {
        let raw = r#"{ "Technical Analysis: SMA": { "2024-01-02": { "SMA": "n/a" } } }"#;
        assert!(serde_json::from_str::<SmaSeries>(raw).is_err());
    }

    #[test]
    fn test_sort_by_date_orders_chronologically() {
        let mut records = vec![
            SmaRecord { date: "2024-01-05".to_string(), sma: 3.0 },
            SmaRecord { date: "2023-12-29".to_string(), sma: 1.0 },
            SmaRecord { date: "2024-01-02".to_string(), sma: 2.0 },
        ];
        sort_by_date(&mut records);
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-12-29", "2024-01-02", "2024-01-05"]);
    }
}
