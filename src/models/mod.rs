// Domain models for the snapshot pipeline
// These modules hold plain data; computation lives in `analysis`

pub mod price_series;
pub mod snapshot;
pub mod snapshot_table;

// Re-export key types for convenience
pub use price_series::PriceSeries;
pub use snapshot::{
    Confidence, ConfidenceStatus, DataQuality, IndicatorValues, PivotLevels, Snapshot, Trend,
};
pub use snapshot_table::SnapshotTable;
