//! Sentiment aggregation.
//!
//! Folds indicator readings, level proximity and candlestick findings into one
//! signed score plus the list of explanations that fired. Contributions are
//! applied in a fixed order and the explanation list follows that order.
//!
//! The volume step scales the score accumulated up to that point instead of
//! adding to it, so moving it would change results.

use serde::{Deserialize, Serialize};
use stockcast_core::types::{Direction, PatternFinding, SupportResistanceLevels};
use stockcast_indicators::IndicatorSnapshot;

pub const MA_CROSSOVER_WEIGHT: f64 = 0.3;
pub const EMA_TREND_WEIGHT: f64 = 0.2;
pub const RSI_WEIGHT: f64 = 0.25;
pub const MACD_WEIGHT: f64 = 0.2;
pub const STOCHASTIC_WEIGHT: f64 = 0.15;
pub const LEVEL_WEIGHT: f64 = 0.1;

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const STOCHASTIC_OVERBOUGHT: f64 = 80.0;
pub const STOCHASTIC_OVERSOLD: f64 = 20.0;

pub const HIGH_VOLUME_RATIO: f64 = 1.5;
pub const LOW_VOLUME_RATIO: f64 = 0.5;
pub const HIGH_VOLUME_FACTOR: f64 = 1.2;
pub const LOW_VOLUME_FACTOR: f64 = 0.8;

/// Fractional distance from price that counts as "near" a level.
pub const LEVEL_PROXIMITY: f64 = 0.02;

/// Score band inside which the trend is neutral.
pub const TREND_THRESHOLD: f64 = 0.1;

/// Everything the aggregator reads for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct SentimentInputs<'a> {
    pub price: f64,
    pub snapshot: &'a IndicatorSnapshot,
    pub volume_ratio: f64,
    pub levels: &'a SupportResistanceLevels,
    pub patterns: &'a [PatternFinding],
}

/// Aggregated score and every signal that fired, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub signals: Vec<String>,
}

impl Sentiment {
    pub fn trend(&self) -> Direction {
        Direction::from_score(self.score, TREND_THRESHOLD)
    }

    fn add(&mut self, weight: f64, signal: impl Into<String>) {
        self.score += weight;
        self.signals.push(signal.into());
    }

    fn scale(&mut self, factor: f64, signal: impl Into<String>) {
        self.score *= factor;
        self.signals.push(signal.into());
    }
}

/// Combines signal sources into a [`Sentiment`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAggregator;

impl SentimentAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, inputs: &SentimentInputs<'_>) -> Sentiment {
        let mut sentiment = Sentiment::default();
        let price = inputs.price;
        let s = inputs.snapshot;

        if price > s.sma20 && s.sma20 > s.sma50 {
            sentiment.add(MA_CROSSOVER_WEIGHT, "Bullish MA crossover");
        } else if price < s.sma20 && s.sma20 < s.sma50 {
            sentiment.add(-MA_CROSSOVER_WEIGHT, "Bearish MA crossover");
        }

        // Equal EMAs carry no trend.
        if s.ema12 > s.ema26 {
            sentiment.add(EMA_TREND_WEIGHT, "EMA12 above EMA26");
        } else if s.ema12 < s.ema26 {
            sentiment.add(-EMA_TREND_WEIGHT, "EMA12 below EMA26");
        }

        if s.rsi > RSI_OVERBOUGHT {
            sentiment.add(-RSI_WEIGHT, format!("Overbought (RSI {:.1})", s.rsi));
        } else if s.rsi < RSI_OVERSOLD {
            sentiment.add(RSI_WEIGHT, format!("Oversold (RSI {:.1})", s.rsi));
        }

        let macd = s.macd;
        if macd.macd > macd.signal && macd.histogram > 0.0 {
            sentiment.add(MACD_WEIGHT, "MACD bullish momentum");
        } else if macd.macd < macd.signal && macd.histogram < 0.0 {
            sentiment.add(-MACD_WEIGHT, "MACD bearish momentum");
        }

        let stoch = s.stochastic;
        if stoch.k > STOCHASTIC_OVERBOUGHT && stoch.d > STOCHASTIC_OVERBOUGHT {
            sentiment.add(-STOCHASTIC_WEIGHT, "Stochastic overbought");
        } else if stoch.k < STOCHASTIC_OVERSOLD && stoch.d < STOCHASTIC_OVERSOLD {
            sentiment.add(STOCHASTIC_WEIGHT, "Stochastic oversold");
        }

        if inputs.volume_ratio > HIGH_VOLUME_RATIO {
            sentiment.scale(HIGH_VOLUME_FACTOR, "High volume confirmation");
        } else if inputs.volume_ratio < LOW_VOLUME_RATIO {
            sentiment.scale(LOW_VOLUME_FACTOR, "Low volume warning");
        }

        if inputs.levels.near_support(price, LEVEL_PROXIMITY) {
            sentiment.add(LEVEL_WEIGHT, "Near support level");
        }
        if inputs.levels.near_resistance(price, LEVEL_PROXIMITY) {
            sentiment.add(-LEVEL_WEIGHT, "Near resistance level");
        }

        for pattern in inputs.patterns {
            sentiment.add(
                pattern.signed_strength(),
                format!("{} pattern ({})", pattern.name, pattern.direction),
            );
        }

        sentiment
    }
}
