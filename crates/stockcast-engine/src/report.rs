//! Forecast report generation.

use serde::{Deserialize, Serialize};
use stockcast_core::types::PredictionResult;

use crate::engine::{MarketAnalysis, PredictionInput};

const RULE: &str = "═══════════════════════════════════════════════════════════\n";
const SECTION: &str = "───────────────────────────────────────────────────────────\n";

/// A forecast together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub symbol: String,
    pub input: PredictionInput,
    pub result: PredictionResult,
    /// Intermediate model state, when the caller asked for it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MarketAnalysis>,
}

impl ForecastReport {
    pub fn new(symbol: impl Into<String>, input: PredictionInput, result: PredictionResult) -> Self {
        Self {
            symbol: symbol.into(),
            input,
            result,
            analysis: None,
        }
    }

    pub fn with_analysis(mut self, analysis: MarketAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(RULE);
        s.push_str("                     FORECAST REPORT                       \n");
        s.push_str(RULE);
        s.push('\n');

        s.push_str("FORECAST\n");
        s.push_str(SECTION);
        s.push_str(&format!("  Symbol:              {}\n", self.symbol));
        s.push_str(&format!(
            "  Current Price:       {:.2}\n",
            self.input.current_price
        ));
        s.push_str(&format!(
            "  Predicted Price:     {:.2}\n",
            self.result.predicted_price
        ));
        s.push_str(&format!(
            "  Change:              {:+.2}%\n",
            self.result.change_percent(self.input.current_price)
        ));
        s.push_str(&format!(
            "  Horizon:             {} min\n",
            self.input.time_horizon_minutes
        ));
        s.push_str(&format!(
            "  Confidence:          {:.1}%\n",
            self.result.confidence * 100.0
        ));
        s.push_str(&format!("  Trend:               {}\n", self.result.trend));
        s.push('\n');

        s.push_str("SIGNALS\n");
        s.push_str(SECTION);
        if self.result.signals.is_empty() {
            s.push_str("  (none)\n");
        }
        for signal in &self.result.signals {
            s.push_str(&format!("  - {}\n", signal));
        }
        s.push('\n');

        if let Some(analysis) = &self.analysis {
            s.push_str(&analysis_section(analysis));
        }

        s.push_str(RULE);

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Text rendering of the model internals.
pub fn analysis_section(analysis: &MarketAnalysis) -> String {
    let snap = &analysis.snapshot;
    let mut s = String::new();

    s.push_str("INDICATORS\n");
    s.push_str(SECTION);
    s.push_str(&format!("  Bars:                {}\n", analysis.bars));
    s.push_str(&format!("  SMA 20 / 50:         {:.2} / {:.2}\n", snap.sma20, snap.sma50));
    s.push_str(&format!("  EMA 12 / 26:         {:.2} / {:.2}\n", snap.ema12, snap.ema26));
    s.push_str(&format!("  RSI 14:              {:.1}\n", snap.rsi));
    s.push_str(&format!(
        "  MACD:                {:.4} (signal {:.4}, hist {:.4})\n",
        snap.macd.macd, snap.macd.signal, snap.macd.histogram
    ));
    s.push_str(&format!(
        "  Bollinger:           {:.2} / {:.2} / {:.2}\n",
        snap.bollinger.lower, snap.bollinger.middle, snap.bollinger.upper
    ));
    s.push_str(&format!(
        "  Stochastic %K/%D:    {:.1} / {:.1}\n",
        snap.stochastic.k, snap.stochastic.d
    ));
    s.push_str(&format!("  ATR 14:              {:.4}\n", analysis.atr));
    s.push_str(&format!("  Volatility:          {:.4}\n", analysis.volatility));
    s.push_str(&format!("  Volume Ratio:        {:.2}\n", analysis.volume_ratio));
    s.push('\n');

    s.push_str("LEVELS & PATTERNS\n");
    s.push_str(SECTION);
    s.push_str(&format!(
        "  Support:             {}\n",
        format_levels(&analysis.levels.support)
    ));
    s.push_str(&format!(
        "  Resistance:          {}\n",
        format_levels(&analysis.levels.resistance)
    ));
    for pattern in &analysis.patterns {
        s.push_str(&format!(
            "  Pattern:             {} ({}, {:.2})\n",
            pattern.name, pattern.direction, pattern.strength
        ));
    }
    s.push('\n');

    s.push_str("SENTIMENT\n");
    s.push_str(SECTION);
    s.push_str(&format!(
        "  Score:               {:+.3} ({})\n",
        analysis.sentiment.score,
        analysis.trend()
    ));
    for signal in &analysis.sentiment.signals {
        s.push_str(&format!("  - {}\n", signal));
    }
    s.push('\n');

    s
}

fn format_levels(levels: &[f64]) -> String {
    if levels.is_empty() {
        return "-".to_string();
    }
    levels
        .iter()
        .map(|l| format!("{:.2}", l))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcast_core::types::Direction;

    fn report() -> ForecastReport {
        ForecastReport::new(
            "AAPL",
            PredictionInput::new(100.0, 1_000, 3e12, 30.0),
            PredictionResult {
                predicted_price: 102.5,
                confidence: 0.72,
                trend: Direction::Bullish,
                signals: vec!["Bullish MA crossover".to_string()],
            },
        )
    }

    #[test]
    fn test_report_summary() {
        let summary = report().summary();
        assert!(summary.contains("AAPL"));
        assert!(summary.contains("102.50"));
        assert!(summary.contains("+2.50%"));
        assert!(summary.contains("72.0%"));
        assert!(summary.contains("bullish"));
        assert!(summary.contains("- Bullish MA crossover"));
        assert!(!summary.contains("INDICATORS"));
    }

    #[test]
    fn test_report_json() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "AAPL");
        assert_eq!(value["result"]["predictedPrice"], 102.5);
        assert_eq!(value["result"]["trend"], "bullish");
        assert!(value.get("analysis").is_none());
    }

    #[test]
    fn test_format_levels() {
        assert_eq!(format_levels(&[]), "-");
        assert_eq!(format_levels(&[101.234, 99.5]), "101.23, 99.50");
    }
}
