//! Volatility indicators.

use serde::{Deserialize, Serialize};
use stockcast_core::traits::{Indicator, OhlcIndicator};
use stockcast_core::types::PriceBar;

use crate::history::trailing;
use crate::moving_average::sma;

/// Population standard deviation; 0 for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = sma(values);
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Standard deviation of simple period-over-period returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Volatility;

impl Volatility {
    /// Value assumed when there are not enough prices to form a return.
    pub const DEFAULT: f64 = 0.02;

    pub fn new() -> Self {
        Self
    }

    /// Simple returns `(p[i] - p[i-1]) / p[i-1]`, skipping zero denominators.
    pub fn returns(prices: &[f64]) -> Vec<f64> {
        prices
            .windows(2)
            .filter(|w| w[0] != 0.0)
            .map(|w| (w[1] - w[0]) / w[0])
            .collect()
    }
}

impl Indicator for Volatility {
    type Output = f64;

    fn compute(&self, data: &[f64]) -> f64 {
        if data.len() < 2 {
            return Self::DEFAULT;
        }
        population_std_dev(&Self::returns(data))
    }

    fn period(&self) -> usize {
        2
    }

    fn name(&self) -> &str {
        "Volatility"
    }
}

/// Average True Range (ATR).
///
/// Measures market volatility by decomposing the entire range
/// of an asset price for that period.
#[derive(Debug, Clone, Copy)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self::new(14)
    }
}

impl OhlcIndicator for Atr {
    type Output = f64;

    /// Simple average of the trailing `period` true ranges; 0 when short.
    ///
    /// The first bar of the slice has no previous close and contributes its
    /// high-low range.
    fn compute_bars(&self, bars: &[PriceBar]) -> f64 {
        if bars.len() < self.period {
            return 0.0;
        }

        let tr: Vec<f64> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| bar.true_range(i.checked_sub(1).map(|p| bars[p].close)))
            .collect();

        sma(trailing(&tr, self.period))
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
    /// Bandwidth ((upper - lower) / middle)
    pub bandwidth: f64,
    /// %B ((price - lower) / (upper - lower))
    pub percent_b: f64,
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of standard deviations.
#[derive(Debug, Clone, Copy)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    /// Bands over the trailing window. Zero variance collapses all three
    /// bands onto the mean with %B at 0.5.
    fn compute(&self, data: &[f64]) -> BollingerOutput {
        let window = trailing(data, self.period);
        let Some(&price) = window.last() else {
            return BollingerOutput::default();
        };

        let mean = sma(window);
        let std_dev = population_std_dev(window);

        let upper = mean + self.std_dev_multiplier * std_dev;
        let lower = mean - self.std_dev_multiplier * std_dev;

        let bandwidth = if mean != 0.0 {
            (upper - lower) / mean
        } else {
            0.0
        };

        let percent_b = if upper != lower {
            (price - lower) / (upper - lower)
        } else {
            0.5
        };

        BollingerOutput {
            upper,
            middle: mean,
            lower,
            bandwidth,
            percent_b,
        }
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}
