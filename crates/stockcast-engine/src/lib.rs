//! Prediction engine for stockcast.
//!
//! Ties the indicator toolkit and signal detectors together into a single
//! forecast. See [`PredictionEngine`] for the entry points.

mod engine;
mod random;
mod report;

pub use engine::{
    MarketAnalysis, PredictionEngine, PredictionInput, INSUFFICIENT_DATA_SIGNAL, MAX_CONFIDENCE,
    MAX_SIGNALS, MIN_CONFIDENCE, MIN_HISTORY_BARS,
};
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use report::{analysis_section, ForecastReport};
