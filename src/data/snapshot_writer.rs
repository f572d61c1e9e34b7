use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::snapshot_filename;
use crate::domain::Timeframe;
use crate::models::{Snapshot, SnapshotTable};
use crate::utils::time_utils::format_date;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Column order shared by every snapshot table. Kept stable so runs diff cleanly.
pub const SNAPSHOT_COLUMNS: [&str; 34] = [
    "symbol",
    "timeframe",
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "sma5",
    "sma9",
    "sma20",
    "sma50",
    "sma120",
    "sma200",
    "ema20",
    "ema50",
    "vwap",
    "bb_upper",
    "bb_middle",
    "bb_lower",
    "rsi14",
    "sma5_dist_pct",
    "ema20_dist_pct",
    "vwap_dist_pct",
    "bb_position",
    "pp",
    "r1",
    "r2",
    "s1",
    "s2",
    "trend",
    "mean_reversion_flag",
    "volatility_flag",
    "data_quality_flag",
];

/// Appended to the daily table only
pub const CONFIDENCE_COLUMNS: [&str; 2] = ["confidence_score", "confidence_status"];

pub fn snapshot_columns(timeframe: Timeframe) -> Vec<&'static str> {
    let mut columns = SNAPSHOT_COLUMNS.to_vec();
    if timeframe == Timeframe::Daily {
        columns.extend(CONFIDENCE_COLUMNS);
    }
    columns
}

// Absent values are empty cells
fn cell(value: Option<f64>) -> String {
    value.map_or(String::new(), |v| v.to_string())
}

// Same spelling as the tables this pipeline replaced
fn flag(value: bool) -> String {
    if value { "True" } else { "False" }.to_string()
}

fn snapshot_record(snapshot: &Snapshot) -> Vec<String> {
    let ind = &snapshot.indicators;
    let candle = &snapshot.candle;
    let mut record = vec![
        snapshot.symbol.clone(),
        snapshot.timeframe.to_string(),
        format_date(candle.date),
        candle.open_price.to_string(),
        candle.high_price.to_string(),
        candle.low_price.to_string(),
        candle.close_price.to_string(),
        candle.volume.to_string(),
        cell(ind.sma5),
        cell(ind.sma9),
        cell(ind.sma20),
        cell(ind.sma50),
        cell(ind.sma120),
        cell(ind.sma200),
        cell(ind.ema20),
        cell(ind.ema50),
        cell(ind.vwap),
        cell(ind.bb_upper),
        cell(ind.bb_middle),
        cell(ind.bb_lower),
        cell(ind.rsi14),
        cell(snapshot.sma5_dist_pct),
        cell(snapshot.ema20_dist_pct),
        cell(snapshot.vwap_dist_pct),
        cell(snapshot.bb_position),
        snapshot.pivots.pp.to_string(),
        snapshot.pivots.r1.to_string(),
        snapshot.pivots.r2.to_string(),
        snapshot.pivots.s1.to_string(),
        snapshot.pivots.s2.to_string(),
        snapshot.trend.to_string(),
        flag(snapshot.mean_reversion_flag),
        flag(snapshot.volatility_flag),
        snapshot.data_quality.to_string(),
    ];

    if snapshot.timeframe == Timeframe::Daily {
        // A daily row is always scored before it is written; unscored rows read as unassessable
        match snapshot.confidence {
            Some(confidence) => {
                record.push(confidence.score.to_string());
                record.push(confidence.status.as_str().to_string());
            }
            None => {
                record.push("0".to_string());
                record.push("unscored".to_string());
            }
        }
    }
    record
}

/// Write one table to `path`, header included even when the table is empty.
pub fn write_snapshot_table(table: &SnapshotTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    writer.write_record(snapshot_columns(table.timeframe))?;
    for snapshot in table.rows() {
        writer
            .write_record(snapshot_record(snapshot))
            .with_context(|| format!("{}: failed to write row", snapshot.symbol))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush: {}", path.display()))?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_table_writes {
        log::info!("💾 {} rows -> {}", table.len(), path.display());
    }
    Ok(())
}

/// Write into `output_dir` under the standard `{universe}_{timeframe}.csv` name.
pub fn write_table_to_dir(table: &SnapshotTable, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(snapshot_filename(table.universe, table.timeframe));
    write_snapshot_table(table, &path)?;
    Ok(path)
}
