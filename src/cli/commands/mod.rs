//! CLI command implementations.

pub mod analyze;
pub mod predict;
pub mod validate;
pub mod watchlist;

use anyhow::{bail, Context, Result};
use std::path::Path;
use stockcast_config::AppConfig;
use stockcast_core::types::PriceSeries;
use stockcast_core::HistorySource;
use stockcast_data::CsvHistorySource;
use stockcast_engine::PredictionInput;
use tracing::{info, warn};

use crate::cli::HistoryArgs;

/// Symbol name when neither `--symbol` nor the file name gives one.
const FALLBACK_SYMBOL: &str = "DATA";

/// A loaded history plus the inputs derived for it.
pub struct Prepared {
    pub symbol: String,
    pub series: PriceSeries,
    pub input: PredictionInput,
}

/// Load the history named by `args` and fill in defaulted inputs.
pub async fn prepare(args: &HistoryArgs, config: &AppConfig, horizon: f64) -> Result<Prepared> {
    let symbol = resolve_symbol(args)?;

    let source = if args.data.is_dir() {
        CsvHistorySource::directory(&args.data)?
    } else {
        CsvHistorySource::file(&args.data)?
    };
    let series = source
        .load_history(&symbol)
        .await
        .with_context(|| format!("Failed to load history for {} from {}", symbol, args.data.display()))?;

    let last = series.last();
    let current_price = match (args.price, last) {
        (Some(price), _) => price,
        (None, Some(bar)) => bar.close,
        (None, None) => bail!("History for {} is empty; pass --price", symbol),
    };
    let volume = args.volume.or(last.map(|bar| bar.volume)).unwrap_or(0);

    let market_cap = match (args.market_cap, config.find_symbol(&symbol)) {
        (Some(cap), _) => cap,
        (None, Some(entry)) => entry.market_cap,
        (None, None) => {
            warn!("{} is not on the watchlist; assuming market cap 0", symbol);
            0.0
        }
    };

    info!(
        "Prepared {} with {} bars (price {}, volume {}, market cap {})",
        symbol,
        series.len(),
        current_price,
        volume,
        market_cap
    );

    Ok(Prepared {
        symbol,
        series,
        input: PredictionInput::new(current_price, volume, market_cap, horizon),
    })
}

fn resolve_symbol(args: &HistoryArgs) -> Result<String> {
    if let Some(symbol) = &args.symbol {
        return Ok(symbol.to_uppercase());
    }
    if args.data.is_dir() {
        bail!(
            "--symbol is required when --data is a directory ({})",
            args.data.display()
        );
    }
    Ok(symbol_from_path(&args.data))
}

fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_uppercase)
        .unwrap_or_else(|| FALLBACK_SYMBOL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_from_path() {
        assert_eq!(symbol_from_path(Path::new("data/aapl.csv")), "AAPL");
        assert_eq!(symbol_from_path(Path::new("TCS.NS.csv")), "TCS.NS");
        assert_eq!(symbol_from_path(Path::new("/")), FALLBACK_SYMBOL);
    }
}
