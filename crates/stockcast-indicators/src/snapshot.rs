//! Point-in-time indicator bundle.

use serde::{Deserialize, Serialize};
use stockcast_core::traits::{Indicator, OhlcIndicator};
use stockcast_core::types::PriceBar;

use crate::momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput};
use crate::moving_average::{ema, Sma};
use crate::volatility::{BollingerBands, BollingerOutput};

/// Indicator values for the last bar of a history.
///
/// Recomputed on every evaluation; nothing here is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub sma20: f64,
    pub sma50: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub rsi: f64,
    pub macd: MacdOutput,
    pub bollinger: BollingerOutput,
    pub stochastic: StochasticOutput,
}

impl IndicatorSnapshot {
    /// Evaluate the full indicator set over `bars` (oldest first).
    ///
    /// SMAs use their trailing windows; EMAs run over every close.
    pub fn from_bars(bars: &[PriceBar]) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        Self {
            sma20: Sma::new(20).compute(&closes),
            sma50: Sma::new(50).compute(&closes),
            ema12: ema(&closes, 12),
            ema26: ema(&closes, 26),
            rsi: Rsi::new(14).compute(&closes),
            macd: Macd::new().compute(&closes),
            bollinger: BollingerBands::new().compute(&closes),
            stochastic: Stochastic::new().compute_bars(bars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_snapshot_is_neutral() {
        let bars: Vec<PriceBar> = (0..60)
            .map(|i| PriceBar::new(i, 100.0, 100.0, 100.0, 100.0, 100_000))
            .collect();
        let snapshot = IndicatorSnapshot::from_bars(&bars);

        assert_eq!(snapshot.sma20, 100.0);
        assert_eq!(snapshot.sma50, 100.0);
        assert_eq!(snapshot.ema12, snapshot.ema26);
        assert_eq!(snapshot.rsi, 50.0);
        assert_eq!(snapshot.macd, MacdOutput::default());
        assert_eq!(snapshot.stochastic, StochasticOutput::NEUTRAL);
        assert_eq!(snapshot.bollinger.upper, snapshot.bollinger.lower);
    }

    #[test]
    fn test_empty_snapshot_uses_defaults() {
        let snapshot = IndicatorSnapshot::from_bars(&[]);
        assert_eq!(snapshot.sma20, 0.0);
        assert_eq!(snapshot.rsi, 50.0);
        assert_eq!(snapshot.stochastic, StochasticOutput::NEUTRAL);
    }
}
