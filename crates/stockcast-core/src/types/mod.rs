//! Core data types.

mod ohlcv;
mod prediction;

pub use ohlcv::{PriceBar, PriceSeries};
pub use prediction::{Direction, PatternFinding, PredictionResult, SupportResistanceLevels};
