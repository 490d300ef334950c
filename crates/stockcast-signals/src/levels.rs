//! Support and resistance detection.
//!
//! A bar is a support point when its low sits strictly below the lows of the
//! two bars on either side, and a resistance point when its high sits strictly
//! above the neighbouring highs. This is a raw local-extrema scan with no
//! smoothing, so noisy series produce noisy levels.

use stockcast_core::types::{PriceBar, SupportResistanceLevels};

/// Bars compared on each side of a candidate.
const LOOKBACK: usize = 2;

/// Levels kept per side.
const MAX_LEVELS: usize = 3;

/// Local-extrema detector over aligned high/low series.
#[derive(Debug, Clone, Copy, Default)]
pub struct SupportResistanceDetector;

impl SupportResistanceDetector {
    pub fn new() -> Self {
        Self
    }

    /// Scan `highs`/`lows` and keep the three most recent hits of each kind,
    /// most recent first.
    pub fn detect(&self, highs: &[f64], lows: &[f64]) -> SupportResistanceLevels {
        let len = highs.len().min(lows.len());
        let mut support = Vec::new();
        let mut resistance = Vec::new();

        if len > 2 * LOOKBACK {
            for i in LOOKBACK..len - LOOKBACK {
                if Self::is_extreme(lows, i, |candidate, other| candidate < other) {
                    support.push(lows[i]);
                }
                if Self::is_extreme(highs, i, |candidate, other| candidate > other) {
                    resistance.push(highs[i]);
                }
            }
        }

        SupportResistanceLevels {
            support: Self::most_recent(support),
            resistance: Self::most_recent(resistance),
        }
    }

    /// Convenience wrapper over a bar slice.
    pub fn detect_bars(&self, bars: &[PriceBar]) -> SupportResistanceLevels {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        self.detect(&highs, &lows)
    }

    fn is_extreme(values: &[f64], i: usize, beats: impl Fn(f64, f64) -> bool) -> bool {
        (1..=LOOKBACK).all(|offset| {
            beats(values[i], values[i - offset]) && beats(values[i], values[i + offset])
        })
    }

    fn most_recent(mut hits: Vec<f64>) -> Vec<f64> {
        let start = hits.len().saturating_sub(MAX_LEVELS);
        hits.drain(..start);
        hits.reverse();
        hits
    }
}
