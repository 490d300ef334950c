//! Core traits.

mod history_source;
mod indicator;

pub use history_source::HistorySource;
pub use indicator::{Indicator, OhlcIndicator};
