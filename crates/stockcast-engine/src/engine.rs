//! Prediction engine.
//!
//! Runs the indicator toolkit, level detection and pattern recognition over a
//! bar history, folds the results into a sentiment score and turns that into
//! a price forecast. The engine holds no state; randomness comes in through a
//! [`RandomSource`] on every call.

use serde::{Deserialize, Serialize};
use stockcast_core::error::PredictionError;
use stockcast_core::traits::{Indicator, OhlcIndicator};
use stockcast_core::types::{
    Direction, PatternFinding, PredictionResult, PriceSeries, SupportResistanceLevels,
};
use stockcast_indicators::{sma, trailing, Atr, IndicatorSnapshot, Volatility};
use stockcast_signals::{
    PatternRecognizer, Sentiment, SentimentAggregator, SentimentInputs,
    SupportResistanceDetector,
};
use tracing::debug;

use crate::random::RandomSource;

/// Bars needed before the full model runs.
pub const MIN_HISTORY_BARS: usize = 50;

/// Maximum number of signals in a result.
pub const MAX_SIGNALS: usize = 5;

pub const MIN_CONFIDENCE: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.95;

pub const INSUFFICIENT_DATA_SIGNAL: &str = "Insufficient historical data";

const FALLBACK_CONFIDENCE: f64 = 0.3;
const FALLBACK_MAX_CHANGE: f64 = 0.01;

const PATTERN_WINDOW: usize = 20;
const VOLATILITY_WINDOW: usize = 20;
const VOLUME_WINDOW: usize = 20;
const ATR_PERIOD: usize = 14;

const TIME_DECAY_MINUTES: f64 = 120.0;
const LARGE_CAP_THRESHOLD: f64 = 1e9;
const LARGE_CAP_FACTOR: f64 = 0.8;
const SMALL_CAP_FACTOR: f64 = 1.2;
const RANDOM_WEIGHT: f64 = 0.2;

/// Bars at which the data-quality term saturates.
const FULL_DATA_BARS: f64 = 100.0;

/// Lower bound on `1 + change`, keeping the forecast strictly positive.
const MIN_PRICE_FACTOR: f64 = 0.01;

/// Per-call scalars that accompany the history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Latest traded price
    pub current_price: f64,
    /// Latest traded volume
    pub volume: u64,
    /// Market capitalisation in the quote currency
    pub market_cap: f64,
    /// How far ahead to project, in minutes
    pub time_horizon_minutes: f64,
}

impl PredictionInput {
    pub fn new(current_price: f64, volume: u64, market_cap: f64, time_horizon_minutes: f64) -> Self {
        Self {
            current_price,
            volume,
            market_cap,
            time_horizon_minutes,
        }
    }

    /// Reject values that would turn the arithmetic into NaN.
    pub fn validate(&self) -> Result<(), PredictionError> {
        if !self.current_price.is_finite() || self.current_price <= 0.0 {
            return Err(PredictionError::InvalidInput(format!(
                "current price must be positive, got {}",
                self.current_price
            )));
        }
        if !self.market_cap.is_finite() || self.market_cap < 0.0 {
            return Err(PredictionError::InvalidInput(format!(
                "market cap must be non-negative, got {}",
                self.market_cap
            )));
        }
        if !self.time_horizon_minutes.is_finite() || self.time_horizon_minutes <= 0.0 {
            return Err(PredictionError::InvalidInput(format!(
                "time horizon must be positive, got {} minutes",
                self.time_horizon_minutes
            )));
        }
        Ok(())
    }
}

/// Everything the full model derives from a history before forecasting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    /// Bars in the history
    pub bars: usize,
    pub snapshot: IndicatorSnapshot,
    pub levels: SupportResistanceLevels,
    pub patterns: Vec<PatternFinding>,
    /// Return volatility over the trailing 20 closes
    pub volatility: f64,
    /// Average true range over the trailing 14 bars (informational)
    pub atr: f64,
    /// Current volume relative to the trailing 20-bar average
    pub volume_ratio: f64,
    pub sentiment: Sentiment,
}

impl MarketAnalysis {
    pub fn trend(&self) -> Direction {
        self.sentiment.trend()
    }
}

/// Stateless forecaster.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionEngine;

impl PredictionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Forecast the price `input.time_horizon_minutes` ahead.
    ///
    /// Histories shorter than [`MIN_HISTORY_BARS`] get a low-confidence
    /// random walk of at most one percent.
    pub fn predict<R: RandomSource + ?Sized>(
        &self,
        input: &PredictionInput,
        history: &PriceSeries,
        rng: &mut R,
    ) -> Result<PredictionResult, PredictionError> {
        input.validate()?;

        if history.len() < MIN_HISTORY_BARS {
            debug!(
                "Only {} bars available, using random-walk fallback",
                history.len()
            );
            let change = rng.uniform(-FALLBACK_MAX_CHANGE, FALLBACK_MAX_CHANGE);
            return Ok(PredictionResult {
                predicted_price: input.current_price * (1.0 + change),
                confidence: FALLBACK_CONFIDENCE,
                trend: Direction::Neutral,
                signals: vec![INSUFFICIENT_DATA_SIGNAL.to_string()],
            });
        }

        let analysis = self.analyze(input, history)?;
        let score = analysis.sentiment.score;

        let time_decay = time_decay(input.time_horizon_minutes);
        let base_change =
            score * analysis.volatility * time_decay * market_cap_factor(input.market_cap);
        let random_component = rng.uniform(-0.5, 0.5) * analysis.volatility * RANDOM_WEIGHT;
        let price_factor = (1.0 + base_change + random_component).max(MIN_PRICE_FACTOR);

        let confidence = confidence(
            analysis.bars,
            analysis.volume_ratio,
            analysis.volatility,
            time_decay,
        );

        debug!(
            "score={:.4} volatility={:.6} decay={:.4} base_change={:.6} random={:.6} confidence={:.4}",
            score, analysis.volatility, time_decay, base_change, random_component, confidence
        );

        let trend = analysis.trend();
        let mut signals = analysis.sentiment.signals;
        signals.truncate(MAX_SIGNALS);

        Ok(PredictionResult {
            predicted_price: input.current_price * price_factor,
            confidence,
            trend,
            signals,
        })
    }

    /// Run the full model up to the sentiment score, without forecasting.
    ///
    /// Works on histories of any length; short ones simply hit the
    /// indicators' neutral defaults.
    pub fn analyze(
        &self,
        input: &PredictionInput,
        history: &PriceSeries,
    ) -> Result<MarketAnalysis, PredictionError> {
        input.validate()?;

        let bars = history.bars();
        let closes = history.closes();
        let volumes = history.volumes();

        let snapshot = IndicatorSnapshot::from_bars(bars);
        let levels = SupportResistanceDetector.detect_bars(bars);
        let patterns = PatternRecognizer.recognize(trailing(bars, PATTERN_WINDOW));
        let volatility = Volatility.compute(trailing(&closes, VOLATILITY_WINDOW));
        let atr = Atr::new(ATR_PERIOD).compute_bars(bars);
        let volume_ratio = volume_ratio(input.volume, trailing(&volumes, VOLUME_WINDOW));

        let sentiment = SentimentAggregator.aggregate(&SentimentInputs {
            price: input.current_price,
            snapshot: &snapshot,
            volume_ratio,
            levels: &levels,
            patterns: &patterns,
        });

        Ok(MarketAnalysis {
            bars: bars.len(),
            snapshot,
            levels,
            patterns,
            volatility,
            atr,
            volume_ratio,
            sentiment,
        })
    }
}

/// Current volume over the window average; 1.0 when the average is zero.
fn volume_ratio(volume: u64, window: &[f64]) -> f64 {
    let average = sma(window);
    if average > 0.0 {
        volume as f64 / average
    } else {
        1.0
    }
}

fn time_decay(horizon_minutes: f64) -> f64 {
    (-horizon_minutes / TIME_DECAY_MINUTES).exp()
}

/// Large caps react less.
fn market_cap_factor(market_cap: f64) -> f64 {
    if market_cap > LARGE_CAP_THRESHOLD {
        LARGE_CAP_FACTOR
    } else {
        SMALL_CAP_FACTOR
    }
}

fn confidence(bars: usize, volume_ratio: f64, volatility: f64, time_decay: f64) -> f64 {
    let data_quality = (bars as f64 / FULL_DATA_BARS).min(1.0);
    let volume_confidence = volume_ratio.min(1.0);
    let volatility_confidence = 1.0 - (volatility * 10.0).min(1.0);

    let composite = 0.3 * data_quality
        + 0.2 * volume_confidence
        + 0.3 * volatility_confidence
        + 0.2 * time_decay;

    (composite * 0.8 + 0.2).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
