//! Configuration module for the snapshot pipeline.

pub mod analysis;
mod debug; // Private: use crate::config::DEBUG_FLAGS
pub mod persistence;
pub mod universe;

pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, CappedPenalty, DataQualityConfig, IndicatorConfig, RiskFlagConfig,
    ScoringConfig,
};
pub use persistence::{
    PERSISTENCE, series_dir, series_filename, snapshot_filename, universe_dir,
};
pub use universe::{AggregatorConfig, INDEX_LIST, StockListing, StockUniverse};
