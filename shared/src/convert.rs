//! Flattening of provider series into standalone per-date records

use crate::models::{
    CompositeRecord, DailyRecord, DailySeries, EmaRecord, EmaSeries, SmaRecord, SmaSeries,
    VwapRecord, VwapSeries,
};

/// Converts a provider series into flat records, one per date key.
///
/// Values carry over verbatim; no validation, no failure mode. The output
/// follows the source map's iteration order, which is unspecified; use
/// [`crate::models::sort_by_date`] for explicit chronology.
pub trait Flatten {
    type Record;

    fn flatten(&self) -> Vec<Self::Record>;
}

impl Flatten for DailySeries {
    type Record = DailyRecord;

    fn flatten(&self) -> Vec<DailyRecord> {
        self.data
            .iter()
            .map(|(date, bar)| DailyRecord {
                date: date.clone(),
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            })
            .collect()
    }
}

impl Flatten for SmaSeries {
    type Record = SmaRecord;

    fn flatten(&self) -> Vec<SmaRecord> {
        self.data
            .iter()
            .map(|(date, point)| SmaRecord {
                date: date.clone(),
                sma: point.value,
            })
            .collect()
    }
}

impl Flatten for EmaSeries {
    type Record = EmaRecord;

    fn flatten(&self) -> Vec<EmaRecord> {
        self.data
            .iter()
            .map(|(date, point)| EmaRecord {
                date: date.clone(),
                ema: point.value,
            })
            .collect()
    }
}

impl Flatten for VwapSeries {
    type Record = VwapRecord;

    fn flatten(&self) -> Vec<VwapRecord> {
        self.data
            .iter()
            .map(|(date, point)| VwapRecord {
                date: date.clone(),
                vwap: point.value,
            })
            .collect()
    }
}

/// Joins a daily OHLCV series with two SMA windows into composite records.
///
/// One record per date key in the daily series, matched against each SMA
/// series by exact date string. A date absent from either SMA series takes
/// `0.0` for that field, a silent gap-fill rather than an error. The SMA
/// key sets need not match the daily series or each other.
pub fn assemble_composite(
    daily: &DailySeries,
    sma_50: &SmaSeries,
    sma_15: &SmaSeries,
) -> Vec<CompositeRecord> {
    daily
        .data
        .iter()
        .map(|(date, bar)| CompositeRecord {
            date: date.clone(),
            open: bar.open,
            close: bar.close,
            high: bar.high,
            low: bar.low,
            volume: bar.volume,
            sma_50_day: sma_50.data.get(date).map(|p| p.value).unwrap_or_default(),
            sma_15_day: sma_15.data.get(date).map(|p| p.value).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyBar, SmaPoint};
    use std::collections::HashSet;

    fn bar(open: f32, high: f32, low: f32, close: f32, volume: f32) -> DailyBar {
        DailyBar {
            open,
            high,
            low,
            close,
            volume,
        }
    }

    fn daily_series(dates: &[&str]) -> DailySeries {
        let mut series = DailySeries::default();
        for (i, date) in dates.iter().enumerate() {
            let base = 10.0 + i as f32;
            series.data.insert(
                date.to_string(),
                bar(base, base + 2.0, base - 1.0, base + 1.0, 1000.0 + i as f32 * 200.0),
            );
        }
        series
    }

    fn sma_series(points: &[(&str, f32)]) -> SmaSeries {
        let mut series = SmaSeries::default();
        for (date, value) in points {
            series.data.insert(date.to_string(), SmaPoint { value: *value });
        }
        series
    }

    #[test]
    fn test_flatten_produces_one_record_per_date() {
        let series = daily_series(&["2024-01-02", "2024-01-03", "2024-01-04"]);
        let records = series.flatten();

        assert_eq!(records.len(), 3);
        let dates: HashSet<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates.len(), 3);
        assert!(dates.contains("2024-01-02"));
        assert!(dates.contains("2024-01-03"));
        assert!(dates.contains("2024-01-04"));
    }

    #[test]
    fn test_flatten_carries_values_verbatim() {
        let mut series = DailySeries::default();
        series
            .data
            .insert("2024-01-02".to_string(), bar(10.0, 12.0, 9.0, 11.0, 1000.0));

        let records = series.flatten();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.open, 10.0);
        assert_eq!(record.high, 12.0);
        assert_eq!(record.low, 9.0);
        assert_eq!(record.close, 11.0);
        assert_eq!(record.volume, 1000.0);
    }

    #[test]
    fn test_flatten_sma_series() {
        let series = sma_series(&[("2024-01-02", 150.5), ("2024-01-03", 151.0)]);
        let records = series.flatten();

        assert_eq!(records.len(), 2);
        let point = records.iter().find(|r| r.date == "2024-01-02").unwrap();
        assert_eq!(point.sma, 150.5);
    }

    #[test]
    fn test_composite_joins_on_date_key() {
        let daily = daily_series(&["2024-01-02"]);
        let sma_50 = sma_series(&[("2024-01-02", 140.0)]);
        let sma_15 = sma_series(&[("2024-01-02", 145.0)]);

        let records = assemble_composite(&daily, &sma_50, &sma_15);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sma_50_day, 140.0);
        assert_eq!(records[0].sma_15_day, 145.0);
    }

    #[test]
    fn test_composite_zero_fills_missing_average_dates() {
        let daily = daily_series(&["2024-01-02", "2024-01-03"]);
        // 50-day window only covers the first date, 15-day covers neither.
        let sma_50 = sma_series(&[("2024-01-02", 140.0)]);
        let sma_15 = sma_series(&[]);

        let records = assemble_composite(&daily, &sma_50, &sma_15);
        assert_eq!(records.len(), 2);

        let first = records.iter().find(|r| r.date == "2024-01-02").unwrap();
        assert_eq!(first.sma_50_day, 140.0);
        assert_eq!(first.sma_15_day, 0.0);

        let second = records.iter().find(|r| r.date == "2024-01-03").unwrap();
        assert_eq!(second.sma_50_day, 0.0);
        assert_eq!(second.sma_15_day, 0.0);
    }

    #[test]
    fn test_composite_ignores_average_only_dates() {
        let daily = daily_series(&["2024-01-02"]);
        let sma_50 = sma_series(&[("2024-01-02", 140.0), ("2023-12-29", 139.0)]);
        let sma_15 = sma_series(&[("2023-12-29", 141.0)]);

        let records = assemble_composite(&daily, &sma_50, &sma_15);
        // Only daily-series dates produce records.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, "2024-01-02");
    }
}
