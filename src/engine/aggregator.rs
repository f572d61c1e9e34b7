use std::time::Instant;

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::analysis::{build_snapshot, confidence_score};
use crate::config::{AggregatorConfig, ScoringConfig};
use crate::data::SeriesSource;
use crate::data::snapshot_writer::write_table_to_dir;
use crate::domain::{Timeframe, Universe};
use crate::models::{Snapshot, SnapshotTable};

use super::report::{RunReport, SymbolFailure, TableCount, Unassessable, UniverseFailure};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// What happened to one symbol at one timeframe
enum SymbolOutcome {
    Built(Box<Snapshot>),
    NoSeries,
    Failed(String),
}

/// Daily (scored), weekly and monthly tables of one universe
#[derive(Debug, Clone)]
pub struct UniverseTables {
    pub universe: Universe,
    pub daily: SnapshotTable,
    pub weekly: SnapshotTable,
    pub monthly: SnapshotTable,
}

impl UniverseTables {
    pub fn tables(&self) -> [&SnapshotTable; 3] {
        [&self.daily, &self.weekly, &self.monthly]
    }
}

pub struct Aggregator {
    pub config: AggregatorConfig,
}

impl Aggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    fn snapshot_symbol(
        &self,
        source: &dyn SeriesSource,
        universe: Universe,
        symbol: &str,
        timeframe: Timeframe,
    ) -> SymbolOutcome {
        let series = match source.load_series(universe, symbol, timeframe) {
            Ok(Some(series)) if !series.is_empty() => series,
            Ok(_) => return SymbolOutcome::NoSeries,
            Err(e) => return SymbolOutcome::Failed(format!("{:#}", e)),
        };
        match build_snapshot(&series, &self.config.analysis) {
            Ok(snapshot) => SymbolOutcome::Built(Box::new(snapshot)),
            Err(e) => SymbolOutcome::Failed(format!("{:#}", e)),
        }
    }

    /// One timeframe table for `symbols`. Symbols are processed in parallel and inserted in
    /// input order; failures go to `report`, symbols without a series are left out.
    pub fn build_table(
        &self,
        source: &dyn SeriesSource,
        universe: Universe,
        timeframe: Timeframe,
        symbols: &[String],
        report: &mut RunReport,
    ) -> SnapshotTable {
        let start = Instant::now();
        let outcomes: Vec<SymbolOutcome> = symbols
            .par_iter()
            .map(|symbol| self.snapshot_symbol(source, universe, symbol, timeframe))
            .collect();

        let mut table = SnapshotTable::new(universe, timeframe);
        for (symbol, outcome) in symbols.iter().zip(outcomes) {
            match outcome {
                SymbolOutcome::Built(snapshot) => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_snapshot_for_symbol == symbol.as_str() {
                        log::info!("🔍 {:?}", snapshot);
                    }
                    if let Err(e) = table.insert(*snapshot) {
                        report.failures.push(SymbolFailure {
                            universe,
                            symbol: symbol.clone(),
                            timeframe,
                            reason: format!("{:#}", e),
                        });
                    }
                }
                SymbolOutcome::NoSeries => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_skipped_symbols {
                        log::info!("⏭️  {} {}: no series", symbol, timeframe);
                    }
                }
                SymbolOutcome::Failed(reason) => {
                    log::warn!("⚠️  {} {} skipped: {}", symbol, timeframe, reason);
                    report.failures.push(SymbolFailure {
                        universe,
                        symbol: symbol.clone(),
                        timeframe,
                        reason,
                    });
                }
            }
        }

        log::info!(
            "🧮 {} {}: {}/{} snapshots in {} ms",
            universe,
            timeframe,
            table.len(),
            symbols.len(),
            start.elapsed().as_millis()
        );
        report.tables.push(TableCount {
            universe,
            timeframe,
            rows: table.len(),
        });
        table
    }

    /// Attach a confidence score to every daily row, looking companions up by exact symbol.
    pub fn score_daily(
        daily: SnapshotTable,
        weekly: &SnapshotTable,
        monthly: &SnapshotTable,
        scoring: &ScoringConfig,
        report: &mut RunReport,
    ) -> SnapshotTable {
        let universe = daily.universe;
        daily.map_rows(|snapshot| {
            let confidence = confidence_score(
                &snapshot,
                weekly.get(&snapshot.symbol),
                monthly.get(&snapshot.symbol),
                scoring,
            );
            if !confidence.is_computed() {
                log::info!(
                    "⏭️  {} not scored: {}",
                    snapshot.symbol,
                    confidence.status.as_str()
                );
                report.unassessable.push(Unassessable {
                    universe,
                    symbol: snapshot.symbol.clone(),
                    status: confidence.status,
                });
            }
            snapshot.with_confidence(confidence)
        })
    }

    pub fn build_universe(
        &self,
        source: &dyn SeriesSource,
        universe: Universe,
        report: &mut RunReport,
    ) -> Result<UniverseTables> {
        let symbols = source
            .list_symbols(universe)
            .with_context(|| format!("Failed to list {} symbols", universe))?;
        log::info!(
            "📂 {}: {} symbols from {}",
            universe,
            symbols.len(),
            source.signature()
        );

        let daily = self.build_table(source, universe, Timeframe::Daily, &symbols, report);
        let weekly = self.build_table(source, universe, Timeframe::Weekly, &symbols, report);
        let monthly = self.build_table(source, universe, Timeframe::Monthly, &symbols, report);
        let daily = Self::score_daily(
            daily,
            &weekly,
            &monthly,
            &self.config.analysis.scoring,
            report,
        );

        Ok(UniverseTables {
            universe,
            daily,
            weekly,
            monthly,
        })
    }

    /// Build every universe without writing anything. A universe whose symbols cannot be
    /// listed is recorded in the report and left out; the others still run.
    pub fn collect(&self, source: &dyn SeriesSource) -> Result<(Vec<UniverseTables>, RunReport)> {
        let mut report = RunReport::default();
        let mut all = Vec::new();
        for universe in Universe::iter() {
            match self.build_universe(source, universe, &mut report) {
                Ok(tables) => all.push(tables),
                Err(e) => {
                    log::warn!("⚠️  {} skipped: {:#}", universe, e);
                    report.universe_failures.push(UniverseFailure {
                        universe,
                        reason: format!("{:#}", e),
                    });
                }
            }
        }
        Ok((all, report))
    }

    /// Build, then persist all six tables. Fails only when nothing at all was built.
    pub fn run(&self, source: &dyn SeriesSource) -> Result<RunReport> {
        let (all, mut report) = self.collect(source)?;
        if report.total_snapshots() == 0 {
            bail!(
                "No snapshots produced from {} (data dir {})",
                source.signature(),
                self.config.data_dir.display()
            );
        }

        for tables in &all {
            for table in tables.tables() {
                let path = write_table_to_dir(table, &self.config.output_dir)?;
                report.written.push(path);
            }
        }
        Ok(report)
    }
}
