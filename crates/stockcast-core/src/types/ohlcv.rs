//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// One historical sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: u64,
}

impl PriceBar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Calculate the bar's body size (absolute difference between open and close).
    #[inline]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Distance from the lower end of the body down to the low.
    #[inline]
    pub fn lower_shadow(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    /// Distance from the upper end of the body up to the high.
    #[inline]
    pub fn upper_shadow(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// Check if the bar is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if the bar is bearish (close < open).
    #[inline]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Calculate the true range (used for ATR).
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }

    fn validate(&self, index: usize) -> Result<(), SeriesError> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    index,
                    field,
                    value,
                });
            }
        }

        if self.low > self.open.min(self.close) || self.high < self.open.max(self.close) {
            return Err(SeriesError::InconsistentBar { index });
        }
        Ok(())
    }
}

/// Validated, chronologically ordered bar history.
///
/// Timestamps are strictly increasing and every bar carries finite, positive,
/// internally consistent prices. The series is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and wrap a list of bars ordered oldest first.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            bar.validate(index)?;
            if index > 0 {
                let previous = bars[index - 1].timestamp;
                if bar.timestamp <= previous {
                    return Err(SeriesError::NonMonotonicTimestamp {
                        index,
                        previous,
                        current: bar.timestamp,
                    });
                }
            }
        }
        Ok(Self { bars })
    }

    /// A series with no bars.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Get the last N bars (fewer if the series is shorter).
    pub fn last_n(&self, n: usize) -> &[PriceBar] {
        let start = self.bars.len().saturating_sub(n);
        &self.bars[start..]
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Extract volumes as floats, ready for averaging.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume as f64).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &PriceBar> {
        self.bars.iter()
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_calculations() {
        let bar = PriceBar::new(1000, 100.0, 110.0, 95.0, 105.0, 1_000_000);

        assert!((bar.range() - 15.0).abs() < 0.001);
        assert!((bar.body() - 5.0).abs() < 0.001);
        assert!((bar.lower_shadow() - 5.0).abs() < 0.001);
        assert!((bar.upper_shadow() - 5.0).abs() < 0.001);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_bar_true_range() {
        let bar = PriceBar::new(1000, 100.0, 110.0, 95.0, 105.0, 1_000_000);

        // Without previous close
        assert!((bar.true_range(None) - 15.0).abs() < 0.001);

        // With previous close that creates gap
        assert!((bar.true_range(Some(90.0)) - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_series_accepts_ordered_bars() {
        let series = PriceSeries::new(vec![
            PriceBar::new(1, 100.0, 101.0, 99.0, 100.5, 1000),
            PriceBar::new(2, 100.5, 102.0, 100.0, 101.5, 2000),
        ])
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.volumes(), vec![1000.0, 2000.0]);
        assert_eq!(series.last_n(5).len(), 2);
        assert_eq!(series.last().unwrap().timestamp, 2);
    }

    #[test]
    fn test_series_rejects_duplicate_timestamp() {
        let err = PriceSeries::new(vec![
            PriceBar::new(5, 100.0, 101.0, 99.0, 100.0, 10),
            PriceBar::new(5, 100.0, 101.0, 99.0, 100.0, 10),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            SeriesError::NonMonotonicTimestamp {
                index: 1,
                previous: 5,
                current: 5
            }
        );
    }

    #[test]
    fn test_series_rejects_nan_price() {
        let err = PriceSeries::new(vec![PriceBar::new(1, 100.0, 101.0, 99.0, f64::NAN, 10)])
            .unwrap_err();

        assert!(matches!(
            err,
            SeriesError::InvalidPrice { index: 0, field: "close", .. }
        ));
    }

    #[test]
    fn test_series_rejects_inconsistent_bar() {
        // close above high
        let err = PriceSeries::new(vec![PriceBar::new(1, 100.0, 101.0, 99.0, 105.0, 10)])
            .unwrap_err();

        assert_eq!(err, SeriesError::InconsistentBar { index: 0 });
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = PriceSeries::new(vec![]).unwrap();
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }
}
