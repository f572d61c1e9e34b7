use std::collections::HashMap;

use anyhow::{Result, bail};

use crate::domain::{Timeframe, Universe};
use crate::models::snapshot::Snapshot;

/// All snapshots of one universe at one timeframe.
/// Rows keep insertion order for output; lookups go through the symbol index.
#[derive(Debug, Clone)]
pub struct SnapshotTable {
    pub universe: Universe,
    pub timeframe: Timeframe,
    rows: Vec<Snapshot>,
    by_symbol: HashMap<String, usize>,
}

impl SnapshotTable {
    pub fn new(universe: Universe, timeframe: Timeframe) -> Self {
        Self {
            universe,
            timeframe,
            rows: Vec::new(),
            by_symbol: HashMap::new(),
        }
    }

    /// One snapshot per symbol per timeframe per run
    pub fn insert(&mut self, snapshot: Snapshot) -> Result<()> {
        if snapshot.timeframe != self.timeframe {
            bail!(
                "{}: {} snapshot cannot go into the {} table",
                snapshot.symbol,
                snapshot.timeframe,
                self.timeframe
            );
        }
        if self.by_symbol.contains_key(&snapshot.symbol) {
            bail!(
                "{}: duplicate snapshot in {} {} table",
                snapshot.symbol,
                self.universe,
                self.timeframe
            );
        }
        self.by_symbol
            .insert(snapshot.symbol.clone(), self.rows.len());
        self.rows.push(snapshot);
        Ok(())
    }

    /// Exact symbol match
    pub fn get(&self, symbol: &str) -> Option<&Snapshot> {
        self.by_symbol.get(symbol).map(|&idx| &self.rows[idx])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn rows(&self) -> &[Snapshot] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Produce a new table with every row replaced by `f(row)`; symbols must not change.
    pub fn map_rows<F>(self, mut f: F) -> Self
    where
        F: FnMut(Snapshot) -> Snapshot,
    {
        let rows: Vec<Snapshot> = self.rows.into_iter().map(&mut f).collect();
        debug_assert!(
            rows.iter()
                .enumerate()
                .all(|(idx, s)| self.by_symbol.get(&s.symbol) == Some(&idx))
        );
        Self {
            universe: self.universe,
            timeframe: self.timeframe,
            rows,
            by_symbol: self.by_symbol,
        }
    }
}
