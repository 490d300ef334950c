//! Technical indicators for stockcast.
//!
//! This crate provides the indicator toolkit used by the prediction engine:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD, Stochastic)
//! - Volatility indicators (ATR, Bollinger Bands, return volatility)
//!
//! Every indicator evaluates to a single value for the latest point and falls
//! back to a neutral constant when the input is too short, so callers always
//! get something usable for newly listed instruments.

pub mod history;
pub mod momentum;
pub mod moving_average;
pub mod snapshot;
pub mod volatility;

pub use history::{expanding_window, trailing};
pub use momentum::{Macd, MacdOutput, Rsi, Stochastic, StochasticOutput};
pub use moving_average::{ema, sma, Ema, Sma};
pub use snapshot::IndicatorSnapshot;
pub use volatility::{population_std_dev, Atr, BollingerBands, BollingerOutput, Volatility};
