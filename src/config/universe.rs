//! Symbol universe configuration.
//!
//! Indices come from a fixed list; stocks come either from a universe JSON
//! (`{"RELIANCE": {"yahoo": "RELIANCE.NS", "sector": "Oil Gas"}, ...}`) or,
//! when none is supplied, from every CSV found in the stock directory.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::analysis::{ANALYSIS, AnalysisConfig};
use crate::config::persistence::PERSISTENCE;

/// Default index universe
pub const INDEX_LIST: &[&str] = &["NIFTY50", "BANKNIFTY", "FINNIFTY", "MIDCAP100", "SENSEX"];

/// One entry of the stock universe JSON
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockListing {
    /// Vendor ticker (e.g. "RELIANCE.NS")
    pub yahoo: String,
    #[serde(default = "unknown_sector")]
    pub sector: String,
}

fn unknown_sector() -> String {
    "Unknown".to_string()
}

/// Symbol -> listing, sorted by symbol
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct StockUniverse {
    pub listings: BTreeMap<String, StockListing>,
}

impl StockUniverse {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open stock universe: {}", path.display()))?;
        let universe: StockUniverse = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse stock universe: {}", path.display()))?;
        Ok(universe)
    }

    pub fn symbols(&self) -> Vec<String> {
        self.listings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Everything the aggregator needs for one run. Passed explicitly; nothing is read from globals.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub index_symbols: Vec<String>,
    /// When `None`, stocks are discovered from the stock directory
    pub stock_universe: Option<StockUniverse>,
    pub analysis: AnalysisConfig,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(PERSISTENCE.source.data_dir),
            output_dir: PathBuf::from(PERSISTENCE.output.snapshot_dir),
            index_symbols: INDEX_LIST.iter().map(|s| s.to_string()).collect(),
            stock_universe: None,
            analysis: ANALYSIS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn universe_json_loads_sorted_symbols() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stocks.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "TCS": {{"yahoo": "TCS.NS", "sector": "IT"}},
                "INFY": {{"yahoo": "INFY.NS"}}
            }}"#
        )
        .unwrap();

        let universe = StockUniverse::load_from_path(&path).unwrap();
        assert_eq!(universe.symbols(), vec!["INFY", "TCS"]);
        assert_eq!(universe.listings["INFY"].sector, "Unknown");
        assert_eq!(universe.listings["TCS"].yahoo, "TCS.NS");
    }

    #[test]
    fn missing_universe_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = StockUniverse::load_from_path(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open stock universe"));
    }
}
