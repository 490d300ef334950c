//! History source trait definitions.

use crate::error::DataError;
use crate::types::PriceSeries;
use async_trait::async_trait;

/// Trait for sources of historical bars.
///
/// The prediction engine never talks to a source directly; callers load a
/// validated series here and hand it over.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Load the bar history for a symbol, oldest first.
    ///
    /// # Arguments
    /// * `symbol` - The ticker to load
    ///
    /// # Returns
    /// A validated series; malformed rows surface as `DataError::InvalidSeries`
    async fn load_history(&self, symbol: &str) -> Result<PriceSeries, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
