pub mod aggregator;
pub mod report;

// Re-export key components
pub use aggregator::{Aggregator, UniverseTables};
pub use report::{RunReport, SymbolFailure, TableCount, Unassessable, UniverseFailure};
