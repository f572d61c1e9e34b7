//! Date coverage reports: first and last date plus distinct day count per symbol.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::{PERSISTENCE, universe_dir};
use crate::data::csv_source::csv_stems;
use crate::data::normalize::read_dated_rows;
use crate::domain::Universe;
use crate::utils::time_utils::format_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageRow {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: usize,
}

/// Key column name in the written report
fn key_column(universe: Universe) -> &'static str {
    match universe {
        Universe::Indices => "index",
        Universe::Stocks => "symbol",
    }
}

fn report_filename(universe: Universe) -> &'static str {
    match universe {
        Universe::Indices => PERSISTENCE.output.index_coverage_file,
        Universe::Stocks => PERSISTENCE.output.stock_coverage_file,
    }
}

/// One row per readable daily file in `dir`, sorted by symbol.
/// Files without a date column or without any dated row are skipped.
pub fn coverage_for_dir(dir: &Path) -> Result<Vec<CoverageRow>> {
    let mut rows = Vec::new();
    for stem in csv_stems(dir)? {
        let path = dir.join(format!("{}.csv", stem));
        let dated = match read_dated_rows(&path) {
            Ok(dated) => dated,
            Err(e) => {
                log::warn!("⚠️  Skipped {}: {:#}", path.display(), e);
                continue;
            }
        };
        match (dated.first_date(), dated.last_date()) {
            (Some(start_date), Some(end_date)) => rows.push(CoverageRow {
                symbol: stem,
                start_date,
                end_date,
                total_days: dated.rows.len(),
            }),
            _ => log::warn!("⚠️  Skipped {}: no dated rows", path.display()),
        }
    }
    // csv_stems is already sorted, rows keep that order
    Ok(rows)
}

pub fn write_coverage(rows: &[CoverageRow], universe: Universe, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    writer.write_record([key_column(universe), "start_date", "end_date", "total_days"])?;
    for row in rows {
        writer.write_record([
            row.symbol.clone(),
            format_date(row.start_date),
            format_date(row.end_date),
            row.total_days.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Build and write the report for one universe. A missing universe directory yields
/// no report (and `Ok(None)`) rather than an error.
pub fn write_universe_report(
    data_dir: &Path,
    report_dir: &Path,
    universe: Universe,
) -> Result<Option<PathBuf>> {
    let dir = universe_dir(data_dir, universe);
    if !dir.is_dir() {
        log::warn!("⚠️  {} directory {} not found", universe, dir.display());
        return Ok(None);
    }
    let rows = coverage_for_dir(&dir)?;
    let path = report_dir.join(report_filename(universe));
    write_coverage(&rows, universe, &path)?;
    log::info!("📋 {} coverage: {} symbols -> {}", universe, rows.len(), path.display());
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn coverage_counts_distinct_days() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("TCS.csv"),
            "date,close\n2024-01-05,1\n2024-01-02,1\n2024-01-05,2\nnope,3\n",
        )
        .unwrap();
        fs::write(dir.path().join("EMPTY.csv"), "date,close\n").unwrap();
        fs::write(dir.path().join("AXIS.csv"), "date,close\n2023-12-29,1\n").unwrap();
        fs::write(dir.path().join("BROKEN.csv"), "close\n1\n").unwrap();

        let rows = coverage_for_dir(dir.path()).unwrap();
        let symbols: Vec<&str> = rows.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AXIS", "TCS"]);

        let tcs = &rows[1];
        assert_eq!(tcs.start_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(tcs.end_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(tcs.total_days, 2);
    }

    #[test]
    fn index_report_uses_index_key() {
        let data = TempDir::new().unwrap();
        let reports = TempDir::new().unwrap();
        let indices = data.path().join("indices");
        fs::create_dir_all(&indices).unwrap();
        fs::write(indices.join("SENSEX.csv"), "Date,Close\n2024-01-02,1\n").unwrap();

        let path = write_universe_report(data.path(), reports.path(), Universe::Indices)
            .unwrap()
            .unwrap();
        assert!(path.ends_with("indices_data_coverage.csv"));
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "index,start_date,end_date,total_days",
                "SENSEX,2024-01-02,2024-01-02,1"
            ]
        );

        assert!(
            write_universe_report(data.path(), reports.path(), Universe::Stocks)
                .unwrap()
                .is_none()
        );
    }
}
