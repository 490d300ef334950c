//! Forecast value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Market direction, used both for pattern findings and the overall trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl Direction {
    /// Classify a signed score against a symmetric dead band.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score > threshold {
            Direction::Bullish
        } else if score < -threshold {
            Direction::Bearish
        } else {
            Direction::Neutral
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Bullish => "bullish",
            Direction::Bearish => "bearish",
            Direction::Neutral => "neutral",
        };
        write!(f, "{}", s)
    }
}

/// A candlestick pattern detected on the most recent bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternFinding {
    /// Pattern identifier, e.g. "Hammer"
    pub name: String,
    /// Which way the pattern leans
    pub direction: Direction,
    /// Weight in [0, 1]
    pub strength: f64,
}

impl PatternFinding {
    pub fn new(name: impl Into<String>, direction: Direction, strength: f64) -> Self {
        Self {
            name: name.into(),
            direction,
            strength,
        }
    }

    /// Contribution to a sentiment score: +strength, -strength or nothing.
    pub fn signed_strength(&self) -> f64 {
        match self.direction {
            Direction::Bullish => self.strength,
            Direction::Bearish => -self.strength,
            Direction::Neutral => 0.0,
        }
    }
}

/// Candidate support and resistance levels, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevels {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
}

impl SupportResistanceLevels {
    /// True if any support level lies within `tolerance` (a fraction of price) of `price`.
    pub fn near_support(&self, price: f64, tolerance: f64) -> bool {
        Self::any_within(&self.support, price, tolerance)
    }

    /// True if any resistance level lies within `tolerance` (a fraction of price) of `price`.
    pub fn near_resistance(&self, price: f64, tolerance: f64) -> bool {
        Self::any_within(&self.resistance, price, tolerance)
    }

    fn any_within(levels: &[f64], price: f64, tolerance: f64) -> bool {
        levels
            .iter()
            .any(|level| (price - level).abs() / price <= tolerance)
    }
}

/// The forecast returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Projected price at the requested horizon
    pub predicted_price: f64,
    /// Heuristic confidence in [0.1, 0.95]
    pub confidence: f64,
    /// Overall direction
    pub trend: Direction,
    /// At most five explanations, in evaluation order
    pub signals: Vec<String>,
}

impl PredictionResult {
    /// Expected move relative to `current_price`, as a percentage.
    pub fn change_percent(&self, current_price: f64) -> f64 {
        if current_price == 0.0 {
            0.0
        } else {
            (self.predicted_price - current_price) / current_price * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_score() {
        assert_eq!(Direction::from_score(0.3, 0.1), Direction::Bullish);
        assert_eq!(Direction::from_score(-0.3, 0.1), Direction::Bearish);
        assert_eq!(Direction::from_score(0.1, 0.1), Direction::Neutral);
        assert_eq!(Direction::from_score(-0.1, 0.1), Direction::Neutral);
    }

    #[test]
    fn test_pattern_signed_strength() {
        assert!((PatternFinding::new("Hammer", Direction::Bullish, 0.15).signed_strength() - 0.15).abs() < 1e-12);
        assert!((PatternFinding::new("Bearish Engulfing", Direction::Bearish, 0.2).signed_strength() + 0.2).abs() < 1e-12);
        assert_eq!(PatternFinding::new("Doji", Direction::Neutral, 0.1).signed_strength(), 0.0);
    }

    #[test]
    fn test_levels_proximity() {
        let levels = SupportResistanceLevels {
            support: vec![98.5],
            resistance: vec![110.0],
        };
        assert!(levels.near_support(100.0, 0.02));
        assert!(!levels.near_resistance(100.0, 0.02));
    }

    #[test]
    fn test_prediction_result_json() {
        let result = PredictionResult {
            predicted_price: 101.0,
            confidence: 0.5,
            trend: Direction::Bullish,
            signals: vec!["Bullish MA crossover".to_string()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["trend"], "bullish");
        assert_eq!(json["predictedPrice"], 101.0);
        assert!((result.change_percent(100.0) - 1.0).abs() < 1e-10);
    }
}
