//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Used when `--config` is absent and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(author, version, about = "Technical-indicator price forecasts for stock tickers")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (overrides logging.level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Explicit config path, else the default one when present.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.is_file().then_some(default)
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast a price from a bar history
    Predict(PredictArgs),
    /// Show the indicator readings and signals behind a forecast
    Analyze(AnalyzeArgs),
    /// List the configured tickers
    Watchlist,
    /// Validate configuration
    ValidateConfig,
}

/// Where the history comes from and which symbol to read.
#[derive(clap::Args)]
pub struct HistoryArgs {
    /// CSV file, or directory of <SYMBOL>.csv files
    #[arg(short, long)]
    pub data: PathBuf,

    /// Ticker symbol (defaults to the file name)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Current price (defaults to the last close)
    #[arg(long)]
    pub price: Option<f64>,

    /// Current volume (defaults to the last bar's volume)
    #[arg(long)]
    pub volume: Option<u64>,

    /// Market capitalisation (defaults to the watchlist entry, else 0)
    #[arg(long)]
    pub market_cap: Option<f64>,
}

#[derive(clap::Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Forecast horizon in minutes (defaults to prediction.default_horizon_minutes)
    #[arg(long)]
    pub horizon: Option<f64>,

    /// Random seed for reproducible output (defaults to prediction.seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include the full analysis in the report
    #[arg(long)]
    pub explain: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_predict() {
        let cli = Cli::parse_from([
            "stockcast",
            "--log-level",
            "debug",
            "predict",
            "--data",
            "aapl.csv",
            "--horizon",
            "60",
            "--seed",
            "7",
            "--output",
            "json",
        ]);

        assert_eq!(cli.log_level.map(LogLevel::as_str), Some("debug"));
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.history.data, PathBuf::from("aapl.csv"));
                assert_eq!(args.horizon, Some(60.0));
                assert_eq!(args.seed, Some(7));
                assert!(args.output == OutputFormat::Json);
                assert!(!args.explain);
            }
            _ => panic!("expected predict"),
        }
    }
}
