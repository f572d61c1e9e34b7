use std::path::PathBuf;

use crate::domain::{Timeframe, Universe};
use crate::models::ConfidenceStatus;

/// A series that could not be turned into a snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolFailure {
    pub universe: Universe,
    pub symbol: String,
    pub timeframe: Timeframe,
    pub reason: String,
}

/// A universe whose symbol list could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct UniverseFailure {
    pub universe: Universe,
    pub reason: String,
}

/// A daily row scored 0 because a companion timeframe was missing
#[derive(Debug, Clone, PartialEq)]
pub struct Unassessable {
    pub universe: Universe,
    pub symbol: String,
    pub status: ConfidenceStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCount {
    pub universe: Universe,
    pub timeframe: Timeframe,
    pub rows: usize,
}

/// Outcome of one snapshot run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub tables: Vec<TableCount>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<SymbolFailure>,
    pub universe_failures: Vec<UniverseFailure>,
    pub unassessable: Vec<Unassessable>,
}

impl RunReport {
    pub fn total_snapshots(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }

    pub fn rows_for(&self, universe: Universe, timeframe: Timeframe) -> Option<usize> {
        self.tables
            .iter()
            .find(|t| t.universe == universe && t.timeframe == timeframe)
            .map(|t| t.rows)
    }

    pub fn log_summary(&self) {
        for t in &self.tables {
            log::info!("📊 {} {}: {} snapshots", t.universe, t.timeframe, t.rows);
        }
        if !self.unassessable.is_empty() {
            log::info!(
                "⏭️  {} daily rows unassessable (missing weekly/monthly)",
                self.unassessable.len()
            );
        }
        for f in &self.universe_failures {
            log::warn!("❌ {} not processed: {}", f.universe, f.reason);
        }
        for f in &self.failures {
            log::warn!("❌ {} {} {}: {}", f.universe, f.symbol, f.timeframe, f.reason);
        }
        log::info!(
            "✅ {} snapshots, {} failures, {} files written",
            self.total_snapshots(),
            self.failures.len(),
            self.written.len()
        );
    }
}
