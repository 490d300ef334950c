//! Error types for stockcast.

use thiserror::Error;

/// A price series failed validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("invalid series: bar {index} has timestamp {current}, not after {previous}")]
    NonMonotonicTimestamp {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("invalid series: bar {index} has invalid {field} price {value}")]
    InvalidPrice {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("invalid series: bar {index} violates low <= open, close <= high")]
    InconsistentBar { index: usize },
}

/// Prediction request errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// History source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No history found at {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    InvalidSeries(#[from] SeriesError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
