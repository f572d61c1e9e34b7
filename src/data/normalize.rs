//! Cleanup of raw vendor CSVs before they reach the strict loader.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use csv::StringRecord;

use crate::data::csv_source::{csv_stems, normalize_header};
use crate::utils::time_utils::{format_date, parse_date};

/// A vendor file reduced to cleaned headers and its dated rows, in date order.
#[derive(Debug, Clone)]
pub struct DatedRows {
    pub headers: StringRecord,
    pub date_pos: usize,
    pub rows: Vec<(NaiveDate, StringRecord)>,
    /// Rows thrown away for an unparseable date or a repeated date
    pub dropped: usize,
}

impl DatedRows {
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|(d, _)| *d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|(d, _)| *d)
    }
}

/// Read a vendor file leniently: headers cleaned, rows with an unparseable date
/// dropped, sorted by date, and repeated dates reduced to their first row.
/// Only a missing `date` column is an error.
pub fn read_dated_rows(path: &Path) -> Result<DatedRows> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV: {}", path.display()))?;

    let headers: StringRecord = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(normalize_header)
        .collect();
    let date_pos = headers
        .iter()
        .position(|h| h == "date")
        .ok_or_else(|| anyhow!("missing `date` column in {}", path.display()))?;

    let mut dropped = 0;
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.with_context(|| format!("Unreadable record in {}", path.display()))?;
        match record.get(date_pos).and_then(parse_date) {
            Some(date) => rows.push((date, record)),
            None => dropped += 1,
        }
    }

    rows.sort_by_key(|(date, _)| *date);
    let before = rows.len();
    rows.dedup_by_key(|(date, _)| *date);
    dropped += before - rows.len();

    Ok(DatedRows {
        headers,
        date_pos,
        rows,
        dropped,
    })
}

/// Rewrite one file in place with cleaned headers and ISO dates. Returns rows dropped.
pub fn normalize_file(path: &Path) -> Result<usize> {
    let dated = read_dated_rows(path)?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to rewrite: {}", path.display()))?;
    writer.write_record(&dated.headers)?;
    for (date, record) in &dated.rows {
        let iso = format_date(*date);
        let cells = record
            .iter()
            .enumerate()
            .map(|(i, cell)| if i == dated.date_pos { iso.as_str() } else { cell });
        writer.write_record(cells)?;
    }
    writer.flush()?;
    Ok(dated.dropped)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub normalized: usize,
    pub rows_dropped: usize,
    pub skipped: Vec<String>,
}

/// Normalize every `*.csv` directly inside `dir`
pub fn normalize_directory(dir: &Path) -> Result<NormalizeSummary> {
    let mut summary = NormalizeSummary::default();
    for stem in csv_stems(dir)? {
        let path = dir.join(format!("{}.csv", stem));
        match normalize_file(&path) {
            Ok(dropped) => {
                summary.normalized += 1;
                summary.rows_dropped += dropped;
                if dropped > 0 {
                    log::info!("🧹 {}: dropped {} rows", path.display(), dropped);
                }
            }
            Err(e) => {
                log::warn!("⚠️  Skipped {}: {:#}", path.display(), e);
                summary.skipped.push(stem);
            }
        }
    }
    Ok(summary)
}
