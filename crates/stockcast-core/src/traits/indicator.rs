//! Indicator trait definitions.

use crate::types::PriceBar;

/// Trait for technical indicators evaluated over a price series.
///
/// Unlike a signal-processing filter, an indicator here produces a single
/// value for the most recent instant. Implementations never fail: when the
/// series is too short they return a documented neutral default.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Evaluate the indicator at the last point of `data` (oldest first).
    fn compute(&self, data: &[f64]) -> Self::Output;

    /// Get the minimum data points required for a non-default result.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Whether `data` is long enough to produce a real value.
    fn is_ready(&self, data: &[f64]) -> bool {
        data.len() >= self.period()
    }
}

/// Indicator that needs the full bar rather than closes alone (e.g. ATR, Stochastic).
pub trait OhlcIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Evaluate the indicator at the last bar of `bars` (oldest first).
    fn compute_bars(&self, bars: &[PriceBar]) -> Self::Output;

    /// Get the minimum bars required for a non-default result.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
