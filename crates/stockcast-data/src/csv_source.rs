//! CSV history source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use stockcast_core::error::DataError;
use stockcast_core::types::{PriceBar, PriceSeries};
use stockcast_core::HistorySource;
use tracing::{debug, info};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

#[derive(Debug, Clone)]
enum Location {
    /// Every symbol reads the same file.
    File(PathBuf),
    /// `<dir>/<SYMBOL>.csv`
    Directory(PathBuf),
}

/// CSV-backed history.
#[derive(Debug, Clone)]
pub struct CsvHistorySource {
    location: Location,
}

impl CsvHistorySource {
    /// Serve every symbol from one file.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NotFound(path.display().to_string()));
        }
        Ok(Self {
            location: Location::File(path.to_path_buf()),
        })
    }

    /// Serve each symbol from `<dir>/<SYMBOL>.csv`.
    pub fn directory(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(DataError::NotFound(dir.display().to_string()));
        }
        Ok(Self {
            location: Location::Directory(dir.to_path_buf()),
        })
    }

    /// Path that holds `symbol`'s history.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        match &self.location {
            Location::File(path) => path.clone(),
            Location::Directory(dir) => dir.join(format!("{}.csv", symbol.to_uppercase())),
        }
    }

    /// Parse CSV rows into a validated series, oldest first.
    pub fn parse<R: Read>(reader: R) -> Result<PriceSeries, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut bars = Vec::new();

        for (row, result) in reader.deserialize().enumerate() {
            let record: CsvRecord =
                result.map_err(|e| DataError::Parse(format!("row {}: {}", row + 1, e)))?;

            let timestamp = parse_timestamp(&record.date)?;
            let volume = parse_volume(record.volume)
                .ok_or_else(|| DataError::Parse(format!("row {}: invalid volume {}", row + 1, record.volume)))?;

            bars.push(PriceBar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                volume,
            ));
        }

        bars.sort_by_key(|b| b.timestamp);

        Ok(PriceSeries::new(bars)?)
    }
}

#[async_trait]
impl HistorySource for CsvHistorySource {
    async fn load_history(&self, symbol: &str) -> Result<PriceSeries, DataError> {
        let path = self.path_for(symbol);
        if !path.is_file() {
            return Err(DataError::NotFound(path.display().to_string()));
        }

        debug!("Reading history for {} from {}", symbol, path.display());
        let file = std::fs::File::open(&path)?;
        let series = Self::parse(file)?;
        info!("Loaded {} bars for {}", series.len(), symbol);

        Ok(series)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Volumes may arrive as floats; negative or non-finite values are rejected.
fn parse_volume(volume: f64) -> Option<u64> {
    if volume.is_finite() && volume >= 0.0 {
        Some(volume.round() as u64)
    } else {
        None
    }
}

/// Parse various timestamp formats into epoch milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp; more than 10 digits means milliseconds
    if let Ok(ts) = date_str.parse::<i64>() {
        if ts > 10_000_000_000 {
            return Ok(ts);
        }
        return ts
            .checked_mul(1000)
            .ok_or_else(|| DataError::Parse(format!("Timestamp out of range: {}", date_str)));
    }

    Err(DataError::Parse(format!("Could not parse date: {}", date_str)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockcast_core::error::SeriesError;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-03,101,103,100,102,1200
2024-01-02,100,102,99,101,1000.4
2024-01-04,102,104,101,103.5,900
";

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2024-01-15").unwrap(), 1_705_276_800_000);
        assert_eq!(
            parse_timestamp("2024-01-15 10:30:00").unwrap(),
            1_705_276_800_000 + (10 * 3600 + 30 * 60) * 1000
        );
        assert_eq!(parse_timestamp("2024-01-15T00:00:00Z").unwrap(), 1_705_276_800_000);
        assert_eq!(parse_timestamp("01/15/2024").unwrap(), 1_705_276_800_000);
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000); // Unix ms
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000); // Unix sec
        assert!(matches!(parse_timestamp("yesterday"), Err(DataError::Parse(_))));
    }

    #[test]
    fn test_parse_timestamp_out_of_range() {
        assert!(matches!(
            parse_timestamp("-9000000000000000000"),
            Err(DataError::Parse(_))
        ));
        assert_eq!(parse_timestamp("-86400").unwrap(), -86_400_000);
    }

    #[test]
    fn test_parse_sorts_rows() {
        let series = CsvHistorySource::parse(SAMPLE.as_bytes()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![101.0, 102.0, 103.5]);
        assert_eq!(series.bars()[0].volume, 1000);
    }

    #[test]
    fn test_lowercase_headers() {
        let data = "timestamp,open,high,low,close,volume\n1705312800,10,11,9,10.5,5\n";
        let series = CsvHistorySource::parse(data.as_bytes()).unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.last().unwrap().timestamp, 1_705_312_800_000);
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let data = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,1,2,1\n2024-01-02,1,2,1,2,1\n";
        let err = CsvHistorySource::parse(data.as_bytes()).unwrap_err();

        assert!(matches!(
            err,
            DataError::InvalidSeries(SeriesError::NonMonotonicTimestamp { index: 1, .. })
        ));
    }

    #[test]
    fn test_inconsistent_bar_rejected() {
        // high below close
        let data = "Date,Open,High,Low,Close,Volume\n2024-01-02,10,10.5,9,11,100\n";
        let err = CsvHistorySource::parse(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid series"));
    }

    #[test]
    fn test_bad_rows() {
        let negative = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,2,1,2,-5\n";
        assert!(matches!(
            CsvHistorySource::parse(negative.as_bytes()),
            Err(DataError::Parse(_))
        ));

        let text = "Date,Open,High,Low,Close,Volume\n2024-01-02,abc,2,1,2,5\n";
        assert!(matches!(
            CsvHistorySource::parse(text.as_bytes()),
            Err(DataError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_paths() {
        assert!(matches!(
            CsvHistorySource::file("/nonexistent/history.csv"),
            Err(DataError::NotFound(_))
        ));
        assert!(matches!(
            CsvHistorySource::directory("/nonexistent/history"),
            Err(DataError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_directory_source() {
        let dir = std::env::temp_dir().join(format!("stockcast-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("AAPL.csv"), SAMPLE).unwrap();

        let source = CsvHistorySource::directory(&dir).unwrap();
        assert_eq!(source.name(), "csv");

        let series = source.load_history("aapl").await.unwrap();
        assert_eq!(series.len(), 3);

        let missing = source.load_history("MSFT").await;
        assert!(matches!(missing, Err(DataError::NotFound(_))));

        let via_helper = crate::load_csv(dir.join("AAPL.csv"), "AAPL").await.unwrap();
        assert_eq!(via_helper, series);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
