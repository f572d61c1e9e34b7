// Loading, writing and housekeeping of CSV candle files
pub mod coverage;
pub mod csv_source;
pub mod normalize;
pub mod resample;
pub mod snapshot_writer;

// Re-export commonly used types
pub use coverage::{CoverageRow, write_universe_report};
pub use csv_source::{CsvDirectorySource, SeriesSource, read_price_series};
pub use normalize::{NormalizeSummary, normalize_directory};
pub use resample::{ResampleSummary, resample, resample_directory};
pub use snapshot_writer::{write_snapshot_table, write_table_to_dir};
