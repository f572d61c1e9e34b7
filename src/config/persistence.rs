//! File persistence and directory layout configuration

use std::path::{Path, PathBuf};

use crate::domain::{Timeframe, Universe};

/// Directory layout of the source candles
pub struct SourceLayout {
    /// Root directory holding all raw candles
    pub data_dir: &'static str,
    /// Sub-directory (under `data_dir`) for index candles
    pub indices_dir: &'static str,
    /// Sub-directory (under `data_dir`) for stock candles
    pub stocks_dir: &'static str,
}

/// Where computed tables end up
pub struct OutputLayout {
    pub snapshot_dir: &'static str,
    pub report_dir: &'static str,
    pub stock_coverage_file: &'static str,
    pub index_coverage_file: &'static str,
}

pub struct PersistenceConfig {
    pub source: SourceLayout,
    pub output: OutputLayout,
    /// Default location of the stock universe JSON
    pub stock_universe_file: &'static str,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    source: SourceLayout {
        data_dir: "data",
        indices_dir: "indices",
        stocks_dir: "stocks/NIFTY500",
    },
    output: OutputLayout {
        snapshot_dir: "precalc",
        report_dir: "reports",
        stock_coverage_file: "nifty500_data_coverage.csv",
        index_coverage_file: "indices_data_coverage.csv",
    },
    stock_universe_file: "config/stocks_nifty500.json",
};

/// Directory holding one universe's candles for a timeframe.
/// Daily candles sit at the universe root; weekly/monthly in a named sub-directory.
/// Example: "data/indices", "data/stocks/NIFTY500/weekly"
pub fn series_dir(data_dir: &Path, universe: Universe, timeframe: Timeframe) -> PathBuf {
    let root = universe_dir(data_dir, universe);
    match timeframe.subdirectory() {
        Some(sub) => root.join(sub),
        None => root,
    }
}

pub fn universe_dir(data_dir: &Path, universe: Universe) -> PathBuf {
    match universe {
        Universe::Indices => data_dir.join(PERSISTENCE.source.indices_dir),
        Universe::Stocks => data_dir.join(PERSISTENCE.source.stocks_dir),
    }
}

/// Source file for a symbol. Dots in symbols are not filesystem friendly (e.g. "M&M.BO").
pub fn series_filename(symbol: &str) -> String {
    format!("{}.csv", symbol.replace('.', "_"))
}

/// Example: "indices_daily.csv", "stocks_monthly.csv"
pub fn snapshot_filename(universe: Universe, timeframe: Timeframe) -> String {
    format!("{}_{}.csv", universe.file_prefix(), timeframe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_series_live_at_universe_root() {
        let data = Path::new("data");
        assert_eq!(
            series_dir(data, Universe::Indices, Timeframe::Daily),
            PathBuf::from("data/indices")
        );
        assert_eq!(
            series_dir(data, Universe::Stocks, Timeframe::Weekly),
            PathBuf::from("data/stocks/NIFTY500/weekly")
        );
    }

    #[test]
    fn snapshot_filenames_follow_universe_and_timeframe() {
        assert_eq!(
            snapshot_filename(Universe::Stocks, Timeframe::Monthly),
            "stocks_monthly.csv"
        );
        assert_eq!(series_filename("BAJAJ-AUTO.NS"), "BAJAJ-AUTO_NS.csv");
    }
}
