//! History sources for stockcast.

mod csv_source;

pub use csv_source::CsvHistorySource;

use std::path::Path;
use stockcast_core::error::DataError;
use stockcast_core::types::PriceSeries;
use stockcast_core::HistorySource;

/// Load a validated series from a single CSV file.
pub async fn load_csv(path: impl AsRef<Path>, symbol: &str) -> Result<PriceSeries, DataError> {
    let source = CsvHistorySource::file(path)?;
    source.load_history(symbol).await
}
