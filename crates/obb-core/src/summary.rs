//! Period statistics over a fetched bar series.
//!
//! Used by the CLI summary block and the `compare` report.

use serde::Serialize;
use time::Date;

use crate::domain::HistoricalBar;

/// Period statistics over a bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub records: usize,
    #[serde(with = "crate::domain::iso_date")]
    pub first_date: Date,
    #[serde(with = "crate::domain::iso_date")]
    pub last_date: Date,
    pub first_close: f64,
    pub latest_close: f64,
    pub period_high: f64,
    pub period_low: f64,
    /// Mean over bars that report a volume; `None` if none do.
    pub average_volume: Option<f64>,
    /// Percent change from the first close to the latest close.
    pub change_pct: Option<f64>,
}

impl SeriesSummary {
    /// `None` for an empty series. Bars are taken in the order given; the
    /// first and last bar define the period endpoints.
    pub fn from_bars(bars: &[HistoricalBar]) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;

        let period_high = bars
            .iter()
            .map(HistoricalBar::high)
            .fold(f64::NEG_INFINITY, f64::max);
        let period_low = bars
            .iter()
            .map(HistoricalBar::low)
            .fold(f64::INFINITY, f64::min);

        let volumes: Vec<f64> = bars.iter().filter_map(HistoricalBar::volume).collect();
        let average_volume = if volumes.is_empty() {
            None
        } else {
            Some(volumes.iter().sum::<f64>() / volumes.len() as f64)
        };

        let change_pct = if first.close() == 0.0 {
            None
        } else {
            Some((last.close() - first.close()) / first.close() * 100.0)
        };

        Some(Self {
            records: bars.len(),
            first_date: first.date(),
            last_date: last.date(),
            first_close: first.close(),
            latest_close: last.close(),
            period_high,
            period_low,
            average_volume,
            change_pct,
        })
    }
}

#[cfg(test)]
mod tests {
    use time::Month;

    use super::*;
    use crate::domain::format_iso_date;

    fn bar(day: u8, high: f64, low: f64, close: f64, volume: Option<f64>) -> HistoricalBar {
        let date = Date::from_calendar_date(2024, Month::January, day).expect("valid date");
        HistoricalBar::new(date, close, high, low, close, volume).expect("valid bar")
    }

    #[test]
    fn summarizes_period() {
        let bars = vec![
            bar(2, 110.0, 95.0, 100.0, Some(1_000.0)),
            bar(3, 130.0, 101.0, 120.0, None),
            bar(4, 112.0, 90.0, 110.0, Some(3_000.0)),
        ];

        let summary = SeriesSummary::from_bars(&bars).expect("non-empty");
        assert_eq!(summary.records, 3);
        assert_eq!(format_iso_date(summary.first_date), "2024-01-02");
        assert_eq!(format_iso_date(summary.last_date), "2024-01-04");
        assert_eq!(summary.latest_close, 110.0);
        assert_eq!(summary.period_high, 130.0);
        assert_eq!(summary.period_low, 90.0);
        assert_eq!(summary.average_volume, Some(2_000.0));
        let change = summary.change_pct.expect("first close is non-zero");
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(SeriesSummary::from_bars(&[]).is_none());
    }

    #[test]
    fn serializes_dates_as_iso_strings() {
        let summary = SeriesSummary::from_bars(&[bar(2, 1.0, 1.0, 1.0, None)]).expect("summary");
        let value = serde_json::to_value(summary).expect("serializes");
        assert_eq!(value["first_date"], "2024-01-02");
        assert_eq!(value["last_date"], "2024-01-02");
        assert_eq!(value["average_volume"], serde_json::Value::Null);
    }
}
