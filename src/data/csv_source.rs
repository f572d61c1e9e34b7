//! Loading price series from the on-disk CSV layout.
//!
//! The loader is strict: a file without the required columns, with an
//! unparseable date or a non-numeric price is rejected as a whole. Cleaning
//! vendor files is the job of `data::normalize`, not of this module.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use csv::StringRecord;

use crate::config::{AggregatorConfig, StockUniverse, series_dir, series_filename};
use crate::domain::{Candle, Timeframe, Universe};
use crate::models::PriceSeries;
use crate::utils::time_utils::parse_date;

/// Columns every source file must carry
pub const REQUIRED_COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Anything that can hand the aggregator price series by (universe, symbol, timeframe)
pub trait SeriesSource: Sync {
    /// Symbols of a universe, in processing order
    fn list_symbols(&self, universe: Universe) -> Result<Vec<String>>;

    /// `Ok(None)` when the symbol simply has no series at this timeframe
    fn load_series(
        &self,
        universe: Universe,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Option<PriceSeries>>;

    /// A unique identifier for this implementation (for logs)
    fn signature(&self) -> &'static str;
}

/// Header cleanup shared with the normalizer: trim, lower-case, spaces to underscores
pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Position of each required column in the header row
fn column_positions(headers: &StringRecord) -> Result<[usize; 6]> {
    let names: Vec<String> = headers.iter().map(normalize_header).collect();
    let mut positions = [0usize; 6];
    for (slot, required) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = names
            .iter()
            .position(|n| n == required)
            .ok_or_else(|| anyhow!("missing `{}` column", required))?;
    }
    Ok(positions)
}

fn parse_number(record: &StringRecord, pos: usize, column: &str, row: usize) -> Result<f64> {
    let raw = record.get(pos).unwrap_or("").trim();
    let value: f64 = raw
        .parse()
        .with_context(|| format!("row {}: non-numeric {} {:?}", row, column, raw))?;
    if !value.is_finite() {
        bail!("row {}: non-finite {} {:?}", row, column, raw);
    }
    Ok(value)
}

/// Read candles from any CSV reader. Rows are sorted by date and duplicate dates
/// dropped (first occurrence kept) before the series is built.
pub fn read_candles<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Vec<Candle>> {
    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let [date_pos, open_pos, high_pos, low_pos, close_pos, volume_pos] =
        column_positions(&headers)?;

    let mut candles = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // Header is line 1
        let row = idx + 2;
        let record = result.with_context(|| format!("row {}: unreadable record", row))?;

        let raw_date = record.get(date_pos).unwrap_or("");
        let date =
            parse_date(raw_date).ok_or_else(|| anyhow!("row {}: bad date {:?}", row, raw_date))?;

        candles.push(Candle::new(
            date,
            parse_number(&record, open_pos, "open", row)?,
            parse_number(&record, high_pos, "high", row)?,
            parse_number(&record, low_pos, "low", row)?,
            parse_number(&record, close_pos, "close", row)?,
            parse_number(&record, volume_pos, "volume", row)?,
        ));
    }

    // Stable sort keeps the first of any duplicated date in front
    candles.sort_by_key(|c| c.date);
    candles.dedup_by_key(|c| c.date);
    Ok(candles)
}

pub fn read_price_series(path: &Path, symbol: &str, timeframe: Timeframe) -> Result<PriceSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;
    let candles =
        read_candles(&mut reader).with_context(|| format!("Invalid CSV: {}", path.display()))?;
    PriceSeries::from_candles(symbol, timeframe, &candles)
}

/// Every `*.csv` in `dir`, as symbols (file stems), sorted
pub fn csv_stems(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut stems = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    stems.sort();
    Ok(stems)
}

// ============================================================================
// CsvDirectorySource: the data/ directory layout
// ============================================================================

pub struct CsvDirectorySource {
    pub data_dir: PathBuf,
    pub index_symbols: Vec<String>,
    pub stock_universe: Option<StockUniverse>,
}

impl CsvDirectorySource {
    pub fn from_config(config: &AggregatorConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            index_symbols: config.index_symbols.clone(),
            stock_universe: config.stock_universe.clone(),
        }
    }

    pub fn series_path(&self, universe: Universe, symbol: &str, timeframe: Timeframe) -> PathBuf {
        series_dir(&self.data_dir, universe, timeframe).join(series_filename(symbol))
    }
}

impl SeriesSource for CsvDirectorySource {
    fn list_symbols(&self, universe: Universe) -> Result<Vec<String>> {
        match universe {
            Universe::Indices => Ok(self.index_symbols.clone()),
            Universe::Stocks => match &self.stock_universe {
                Some(listed) => Ok(listed.symbols()),
                None => {
                    let dir = series_dir(&self.data_dir, universe, Timeframe::Daily);
                    if !dir.is_dir() {
                        log::warn!("⚠️  Stock directory {} not found", dir.display());
                        return Ok(Vec::new());
                    }
                    csv_stems(&dir)
                }
            },
        }
    }

    fn load_series(
        &self,
        universe: Universe,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<Option<PriceSeries>> {
        let path = self.series_path(universe, symbol, timeframe);
        if !path.exists() {
            return Ok(None);
        }
        read_price_series(&path, symbol, timeframe).map(Some)
    }

    fn signature(&self) -> &'static str {
        "CSV Directory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn reader(text: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes())
    }

    #[test]
    fn headers_are_matched_case_insensitively() {
        let text = "Date,Open,High,Low,Close,Adj Close,Volume\n\
                    2024-01-02,10,11,9,10.5,10.5,1000\n";
        let candles = read_candles(&mut reader(text)).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close_price, 10.5);
        assert_eq!(candles[0].volume, 1000.0);
    }

    #[test]
    fn rows_are_sorted_and_deduplicated() {
        let text = "date,open,high,low,close,volume\n\
                    2024-01-03,2,2,2,2,1\n\
                    2024-01-02,1,1,1,1,1\n\
                    2024-01-03,3,3,3,3,1\n";
        let candles = read_candles(&mut reader(text)).unwrap();
        let dates: Vec<NaiveDate> = candles.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
            ]
        );
        // First occurrence of the duplicated date survives
        assert_eq!(candles[1].close_price, 2.0);
    }

    #[test]
    fn missing_date_column_is_rejected() {
        let text = "day,open,high,low,close,volume\n2024-01-02,1,1,1,1,1\n";
        let err = read_candles(&mut reader(text)).unwrap_err();
        assert!(err.to_string().contains("missing `date` column"));
    }

    #[test]
    fn bad_date_and_bad_number_are_rejected() {
        let text = "date,open,high,low,close,volume\nnot-a-date,1,1,1,1,1\n";
        assert!(read_candles(&mut reader(text)).is_err());

        let text = "date,open,high,low,close,volume\n2024-01-02,1,1,1,,1\n";
        let err = read_candles(&mut reader(text)).unwrap_err();
        assert!(format!("{:#}", err).contains("non-numeric close"));
    }

    #[test]
    fn directory_source_resolves_layout() {
        let dir = TempDir::new().unwrap();
        let weekly = dir.path().join("indices").join("weekly");
        fs::create_dir_all(&weekly).unwrap();
        let mut file = File::create(weekly.join("NIFTY50.csv")).unwrap();
        writeln!(file, "date,open,high,low,close,volume").unwrap();
        writeln!(file, "2024-01-05,1,2,0.5,1.5,100").unwrap();

        let source = CsvDirectorySource {
            data_dir: dir.path().to_path_buf(),
            index_symbols: vec!["NIFTY50".to_string(), "SENSEX".to_string()],
            stock_universe: None,
        };

        let series = source
            .load_series(Universe::Indices, "NIFTY50", Timeframe::Weekly)
            .unwrap()
            .unwrap();
        assert_eq!(series.timeframe, Timeframe::Weekly);
        assert_eq!(series.klines(), 1);

        assert!(
            source
                .load_series(Universe::Indices, "SENSEX", Timeframe::Weekly)
                .unwrap()
                .is_none()
        );
        assert!(source.list_symbols(Universe::Stocks).unwrap().is_empty());
    }

    #[test]
    fn stock_symbols_are_discovered_from_daily_files() {
        let dir = TempDir::new().unwrap();
        let stocks = dir.path().join("stocks").join("NIFTY500");
        fs::create_dir_all(stocks.join("weekly")).unwrap();
        File::create(stocks.join("TCS.csv")).unwrap();
        File::create(stocks.join("INFY.csv")).unwrap();
        File::create(stocks.join("notes.txt")).unwrap();

        let source = CsvDirectorySource {
            data_dir: dir.path().to_path_buf(),
            index_symbols: Vec::new(),
            stock_universe: None,
        };
        assert_eq!(source.list_symbols(Universe::Stocks).unwrap(), vec!["INFY", "TCS"]);
    }
}
