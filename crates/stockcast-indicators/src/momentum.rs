//! Momentum indicators.

use serde::{Deserialize, Serialize};
use stockcast_core::traits::{Indicator, OhlcIndicator};
use stockcast_core::types::PriceBar;

use crate::history::{expanding_window, trailing};
use crate::moving_average::{ema, sma};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone, Copy)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Neutral reading returned when there is nothing to measure.
    pub const NEUTRAL: f64 = 50.0;

    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    /// Averages gains and losses over the last `period` deltas.
    ///
    /// Returns 50 with fewer than `period + 1` points, 100 when there were
    /// gains but no losses, and 50 again when price did not move at all.
    fn compute(&self, data: &[f64]) -> f64 {
        if data.len() < self.period + 1 {
            return Self::NEUTRAL;
        }

        let start = data.len() - self.period;
        let mut gains = 0.0;
        let mut losses = 0.0;
        for i in start..data.len() {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let period_f64 = self.period as f64;
        let avg_gain = gains / period_f64;
        let avg_loss = losses / period_f64;

        if avg_loss == 0.0 {
            if avg_gain == 0.0 {
                Self::NEUTRAL
            } else {
                100.0
            }
        } else {
            100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
        }
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of the MACD history)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum.
#[derive(Debug, Clone, Copy)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }

    /// MACD line over the whole of `prices`.
    pub fn line(&self, prices: &[f64]) -> f64 {
        ema(prices, self.fast_period) - ema(prices, self.slow_period)
    }

    /// MACD line re-derived on every prefix at least `slow_period` long.
    pub fn line_history(&self, prices: &[f64]) -> Vec<f64> {
        expanding_window(prices, self.slow_period, |prefix| self.line(prefix))
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn compute(&self, data: &[f64]) -> MacdOutput {
        let macd = self.line(data);
        let signal = ema(&self.line_history(data), self.signal_period);
        MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        }
    }

    fn period(&self) -> usize {
        self.slow_period + self.signal_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

/// Stochastic oscillator output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticOutput {
    /// %K (fast stochastic)
    pub k: f64,
    /// %D (slow stochastic / signal)
    pub d: f64,
}

impl StochasticOutput {
    /// Both lines at the midpoint.
    pub const NEUTRAL: Self = Self { k: 50.0, d: 50.0 };
}

impl Default for StochasticOutput {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Stochastic oscillator.
///
/// Compares closing price to the price range over a period.
#[derive(Debug, Clone, Copy)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Stochastic {
    /// Create a new stochastic oscillator with default parameters (14, 3).
    pub fn new() -> Self {
        Self::with_periods(14, 3)
    }

    /// Create with custom periods.
    pub fn with_periods(k_period: usize, d_period: usize) -> Self {
        assert!(k_period > 0 && d_period > 0);
        Self { k_period, d_period }
    }

    /// Calculate stochastic from aligned high/low/close slices.
    pub fn compute_hlc(&self, high: &[f64], low: &[f64], close: &[f64]) -> StochasticOutput {
        let len = high.len().min(low.len()).min(close.len());
        if len < self.k_period {
            return StochasticOutput::NEUTRAL;
        }
        // Keep the most recent `len` bars of each so the windows line up.
        let (high, low, close) = (trailing(high, len), trailing(low, len), trailing(close, len));

        let k_values = expanding_window(close, self.k_period, |prefix| {
            let end = prefix.len();
            let start = end - self.k_period;
            Self::percent_k(&high[start..end], &low[start..end], close[end - 1])
        });

        let k = k_values.last().copied().unwrap_or(StochasticOutput::NEUTRAL.k);
        let d = sma(trailing(&k_values, self.d_period));
        StochasticOutput { k, d }
    }

    /// %K for one window; 50 when the window has no range.
    fn percent_k(high: &[f64], low: &[f64], close: f64) -> f64 {
        let highest = high.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lowest = low.iter().cloned().fold(f64::INFINITY, f64::min);

        let range = highest - lowest;
        if range == 0.0 {
            50.0 // Undefined, use midpoint
        } else {
            ((close - lowest) / range) * 100.0
        }
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new()
    }
}

impl OhlcIndicator for Stochastic {
    type Output = StochasticOutput;

    fn compute_bars(&self, bars: &[PriceBar]) -> StochasticOutput {
        let high: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let low: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
        self.compute_hlc(&high, &low, &close)
    }

    fn period(&self) -> usize {
        self.k_period
    }

    fn name(&self) -> &str {
        "Stochastic"
    }
}
