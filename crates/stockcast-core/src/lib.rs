//! Core types and traits for stockcast.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceBar, PriceSeries)
//! - Forecast value types (PredictionResult, PatternFinding, SupportResistanceLevels)
//! - Core traits for indicators and history sources

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, PredictionError, SeriesError};
pub use traits::*;
pub use types::*;
