#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod utils;

use std::path::PathBuf;

use anyhow::Result;

// Re-export commonly used types
pub use config::{AggregatorConfig, StockUniverse};
pub use data::{CsvDirectorySource, SeriesSource};
pub use domain::{Candle, Timeframe, Universe};
pub use engine::{Aggregator, RunReport};
pub use models::{Confidence, PriceSeries, Snapshot, SnapshotTable};

// CLI argument parsing
use clap::{Parser, Subcommand};

use crate::config::{INDEX_LIST, PERSISTENCE, universe_dir};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory of the source candles
    #[arg(long, global = true, default_value = PERSISTENCE.source.data_dir)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build daily/weekly/monthly snapshot tables with confidence scores
    Snapshots {
        #[arg(long, default_value = PERSISTENCE.output.snapshot_dir)]
        output_dir: PathBuf,

        /// Stock universe JSON; without it every stock CSV is processed
        #[arg(long)]
        stock_universe: Option<PathBuf>,

        /// Index symbols (defaults to the built-in list)
        #[arg(long, value_delimiter = ',')]
        indices: Vec<String>,
    },
    /// Resample daily candles into weekly and monthly candles
    Candles,
    /// Write per-symbol date coverage reports
    Coverage {
        #[arg(long, default_value = PERSISTENCE.output.report_dir)]
        report_dir: PathBuf,
    },
    /// Clean vendor CSVs in place (headers, dates, order, duplicates)
    Normalize,
}

impl Cli {
    /// Runtime configuration of a `snapshots` run
    pub fn aggregator_config(&self) -> Result<Option<AggregatorConfig>> {
        let Command::Snapshots {
            output_dir,
            stock_universe,
            indices,
        } = &self.command
        else {
            return Ok(None);
        };

        let index_symbols = if indices.is_empty() {
            INDEX_LIST.iter().map(|s| s.to_string()).collect()
        } else {
            indices.clone()
        };
        let stock_universe = stock_universe
            .as_deref()
            .map(StockUniverse::load_from_path)
            .transpose()?;

        Ok(Some(AggregatorConfig {
            data_dir: self.data_dir.clone(),
            output_dir: output_dir.clone(),
            index_symbols,
            stock_universe,
            ..Default::default()
        }))
    }

    /// Daily candle directories of both universes
    pub fn universe_dirs(&self) -> Vec<PathBuf> {
        [Universe::Indices, Universe::Stocks]
            .into_iter()
            .map(|u| universe_dir(&self.data_dir, u))
            .collect()
    }
}

/// Run the core snapshot pipeline over the CSV directory layout
pub fn run_snapshots(config: AggregatorConfig) -> Result<RunReport> {
    let source = CsvDirectorySource::from_config(&config);
    let aggregator = Aggregator::new(config);
    aggregator.run(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_args_build_config() {
        let cli = Cli::parse_from([
            "market-snapshots",
            "--data-dir",
            "/tmp/d",
            "snapshots",
            "--indices",
            "NIFTY50,SENSEX",
        ]);
        let config = cli.aggregator_config().unwrap().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/d"));
        assert_eq!(config.output_dir, PathBuf::from("precalc"));
        assert_eq!(config.index_symbols, vec!["NIFTY50", "SENSEX"]);
        assert!(config.stock_universe.is_none());
    }

    #[test]
    fn default_indices_and_other_commands() {
        let cli = Cli::parse_from(["market-snapshots", "snapshots"]);
        let config = cli.aggregator_config().unwrap().unwrap();
        assert_eq!(config.index_symbols.len(), INDEX_LIST.len());

        let cli = Cli::parse_from(["market-snapshots", "candles"]);
        assert!(cli.aggregator_config().unwrap().is_none());
        assert_eq!(cli.universe_dirs()[1], PathBuf::from("data/stocks/NIFTY500"));
    }

    #[test]
    fn missing_universe_file_is_an_error() {
        let cli = Cli::parse_from([
            "market-snapshots",
            "snapshots",
            "--stock-universe",
            "/definitely/not/here.json",
        ]);
        assert!(cli.aggregator_config().is_err());
    }
}
