//! Moving average indicators.

use stockcast_core::traits::Indicator;

use crate::history::trailing;

/// Arithmetic mean of `values`; 0 for an empty slice.
pub fn sma(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Exponential moving average over the whole of `prices`.
///
/// Seeded with the first price and smoothed with `2 / (period + 1)` across
/// every supplied point, so the caller decides how much history goes in.
/// Returns the last price when fewer than `period` points are given and 0 for
/// an empty slice.
pub fn ema(prices: &[f64], period: usize) -> f64 {
    let Some(&last) = prices.last() else {
        return 0.0;
    };
    if prices.len() < period {
        return last;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = prices[0];
    for &price in &prices[1..] {
        ema = (price - ema) * multiplier + ema;
    }
    ema
}

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone, Copy)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    /// Mean of the trailing window; shorter inputs average what is there.
    fn compute(&self, data: &[f64]) -> f64 {
        sma(trailing(data, self.period))
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Smoothing factor `2 / (period + 1)`.
    pub fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn compute(&self, data: &[f64]) -> f64 {
        ema(data, self.period)
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        assert!((sma(&[10.0, 20.0, 30.0]) - 20.0).abs() < 1e-10);
        assert_eq!(sma(&[]), 0.0);
    }

    #[test]
    fn test_sma_trailing_window() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        assert!((sma.compute(&data) - 4.0).abs() < 1e-10); // (3+4+5)/3
        assert!((sma.compute(&data[..2]) - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_ema_seeded_with_first_price() {
        // mult = 2/(3+1) = 0.5
        // 1 -> (2-1)*0.5+1 = 1.5 -> (3-1.5)*0.5+1.5 = 2.25
        let result = ema(&[1.0, 2.0, 3.0], 3);
        assert!((result - 2.25).abs() < 1e-10);
    }

    #[test]
    fn test_ema_short_series_returns_last_price() {
        assert_eq!(ema(&[5.0, 7.0], 12), 7.0);
        assert_eq!(ema(&[], 12), 0.0);
    }

    #[test]
    fn test_ema_flat_series_is_exact() {
        let data = vec![100.0; 60];
        assert_eq!(ema(&data, 12), 100.0);
        assert_eq!(ema(&data, 26), 100.0);
    }

    #[test]
    fn test_ema_indicator_matches_function() {
        let data: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let indicator = Ema::new(12);
        assert_eq!(indicator.compute(&data), ema(&data, 12));
        assert!((indicator.multiplier() - 2.0 / 13.0).abs() < 1e-12);
    }
}
