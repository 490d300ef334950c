//! Signal sources layered on top of the indicator toolkit.
//!
//! This crate provides:
//! - Support/resistance detection (local extrema of highs and lows)
//! - Candlestick pattern recognition (Hammer, Doji, Engulfing)
//! - Sentiment aggregation into a single signed score

mod levels;
mod patterns;
mod sentiment;

pub use levels::SupportResistanceDetector;
pub use patterns::{PatternRecognizer, BEARISH_ENGULFING, BULLISH_ENGULFING, DOJI, HAMMER};
pub use sentiment::{
    Sentiment, SentimentAggregator, SentimentInputs, LEVEL_PROXIMITY, TREND_THRESHOLD,
};
