//! Candlestick pattern recognition.
//!
//! Only the last one or two bars are inspected. Hammer and Doji look at the
//! last bar, Engulfing compares it with the bar before; every match is
//! reported.

use stockcast_core::types::{Direction, PatternFinding, PriceBar};

pub const HAMMER: &str = "Hammer";
pub const DOJI: &str = "Doji";
pub const BULLISH_ENGULFING: &str = "Bullish Engulfing";
pub const BEARISH_ENGULFING: &str = "Bearish Engulfing";

const HAMMER_STRENGTH: f64 = 0.15;
const DOJI_STRENGTH: f64 = 0.1;
const ENGULFING_STRENGTH: f64 = 0.2;

/// Recognizes elementary candlestick patterns on the most recent bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRecognizer;

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }

    /// All patterns matching the tail of `bars`, in Hammer, Doji, Engulfing order.
    pub fn recognize(&self, bars: &[PriceBar]) -> Vec<PatternFinding> {
        let mut findings = Vec::new();
        let Some(current) = bars.last() else {
            return findings;
        };

        if Self::is_hammer(current) {
            findings.push(PatternFinding::new(HAMMER, Direction::Bullish, HAMMER_STRENGTH));
        }
        if Self::is_doji(current) {
            findings.push(PatternFinding::new(DOJI, Direction::Neutral, DOJI_STRENGTH));
        }

        if let [.., previous, current] = bars {
            if Self::is_bullish_engulfing(previous, current) {
                findings.push(PatternFinding::new(
                    BULLISH_ENGULFING,
                    Direction::Bullish,
                    ENGULFING_STRENGTH,
                ));
            } else if Self::is_bearish_engulfing(previous, current) {
                findings.push(PatternFinding::new(
                    BEARISH_ENGULFING,
                    Direction::Bearish,
                    ENGULFING_STRENGTH,
                ));
            }
        }

        findings
    }

    /// Long lower shadow, short upper shadow.
    fn is_hammer(bar: &PriceBar) -> bool {
        let body = bar.body();
        bar.lower_shadow() > 2.0 * body && bar.upper_shadow() < 0.5 * body
    }

    fn is_doji(bar: &PriceBar) -> bool {
        bar.body() < 0.1 * bar.range()
    }

    fn is_bullish_engulfing(previous: &PriceBar, current: &PriceBar) -> bool {
        previous.is_bearish()
            && current.is_bullish()
            && current.open <= previous.close
            && current.close >= previous.open
    }

    fn is_bearish_engulfing(previous: &PriceBar, current: &PriceBar) -> bool {
        previous.is_bullish()
            && current.is_bearish()
            && current.open >= previous.close
            && current.close <= previous.open
    }
}
