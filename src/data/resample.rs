//! Weekly / monthly candles from daily candles.
//!
//! Weeks close on Friday (a Saturday or Sunday print belongs to the following
//! week); months close on their last calendar day. The bucket's closing date
//! labels the aggregated candle. Buckets without data are never emitted.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::data::csv_source::{REQUIRED_COLUMNS, csv_stems, read_candles};
use crate::domain::{Candle, Timeframe};
use crate::utils::maths_utils::{get_max, get_min};
use crate::utils::time_utils::{format_date, month_end, week_ending_friday};

fn bucket_label(date: chrono::NaiveDate, timeframe: Timeframe) -> chrono::NaiveDate {
    match timeframe {
        Timeframe::Daily => date,
        Timeframe::Weekly => week_ending_friday(date),
        Timeframe::Monthly => month_end(date),
    }
}

/// Aggregate date-sorted candles: open first, high max, low min, close last, volume sum.
pub fn resample(candles: &[Candle], timeframe: Timeframe) -> Vec<Candle> {
    candles
        .iter()
        .chunk_by(|c| bucket_label(c.date, timeframe))
        .into_iter()
        .filter_map(|(label, bucket)| {
            let bucket: Vec<&Candle> = bucket.collect();
            let first = bucket.first()?;
            let last = bucket.last()?;
            let highs: Vec<f64> = bucket.iter().map(|c| c.high_price).collect();
            let lows: Vec<f64> = bucket.iter().map(|c| c.low_price).collect();
            Some(Candle::new(
                label,
                first.open_price,
                get_max(&highs),
                get_min(&lows),
                last.close_price,
                bucket.iter().map(|c| c.volume).sum(),
            ))
        })
        .collect()
}

pub fn write_candles(path: &Path, candles: &[Candle]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    writer.write_record(REQUIRED_COLUMNS)?;
    for c in candles {
        writer.write_record([
            format_date(c.date),
            c.open_price.to_string(),
            c.high_price.to_string(),
            c.low_price.to_string(),
            c.close_price.to_string(),
            c.volume.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResampleSummary {
    pub processed: usize,
    pub skipped: Vec<String>,
}

/// Resample every daily CSV in `base_dir` into `base_dir/weekly` and `base_dir/monthly`.
/// A file that cannot be read is skipped with a warning; the rest carry on.
pub fn resample_directory(base_dir: &Path) -> Result<ResampleSummary> {
    let mut summary = ResampleSummary::default();

    for stem in csv_stems(base_dir)? {
        let file_name = format!("{}.csv", stem);
        let path = base_dir.join(&file_name);

        let candles = csv::Reader::from_path(&path)
            .map_err(anyhow::Error::from)
            .and_then(|mut reader| read_candles(&mut reader));
        let candles = match candles {
            Ok(candles) => candles,
            Err(e) => {
                log::warn!("⚠️  Skipped {}: {:#}", file_name, e);
                summary.skipped.push(stem);
                continue;
            }
        };

        for timeframe in [Timeframe::Weekly, Timeframe::Monthly] {
            let sub = timeframe.subdirectory().unwrap_or_default();
            let out = base_dir.join(sub).join(&file_name);
            write_candles(&out, &resample(&candles, timeframe))?;
        }

        log::info!("✅ Resampled {}", path.display());
        summary.processed += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::TempDir;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn daily() -> Vec<Candle> {
        vec![
            // Week ending Fri 2024-01-26
            Candle::new(ymd(1, 24), 10.0, 12.0, 9.0, 11.0, 100.0),
            Candle::new(ymd(1, 25), 11.0, 13.0, 10.0, 12.0, 200.0),
            Candle::new(ymd(1, 26), 12.0, 12.5, 8.0, 9.0, 300.0),
            // Week ending Fri 2024-02-02, crosses the month boundary
            Candle::new(ymd(1, 31), 9.0, 10.0, 8.5, 9.5, 50.0),
            Candle::new(ymd(2, 1), 9.5, 15.0, 9.0, 14.0, 70.0),
        ]
    }

    #[test]
    fn weekly_buckets_close_on_friday() {
        let weekly = resample(&daily(), Timeframe::Weekly);
        assert_eq!(weekly.len(), 2);

        assert_eq!(weekly[0], Candle::new(ymd(1, 26), 10.0, 13.0, 8.0, 9.0, 600.0));
        assert_eq!(weekly[1], Candle::new(ymd(2, 2), 9.0, 15.0, 8.5, 14.0, 120.0));
    }

    #[test]
    fn monthly_buckets_close_on_month_end() {
        let monthly = resample(&daily(), Timeframe::Monthly);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0], Candle::new(ymd(1, 31), 10.0, 13.0, 8.0, 9.5, 650.0));
        assert_eq!(monthly[1], Candle::new(ymd(2, 29), 9.5, 15.0, 9.0, 14.0, 70.0));
    }

    #[test]
    fn gaps_do_not_produce_empty_buckets() {
        let candles = vec![
            Candle::new(ymd(1, 2), 1.0, 1.0, 1.0, 1.0, 1.0),
            Candle::new(ymd(3, 4), 2.0, 2.0, 2.0, 2.0, 1.0),
        ];
        assert_eq!(resample(&candles, Timeframe::Monthly).len(), 2);
        assert_eq!(resample(&candles, Timeframe::Weekly).len(), 2);
        assert!(resample(&[], Timeframe::Weekly).is_empty());
    }

    #[test]
    fn directory_resampling_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        write_candles(&dir.path().join("GOOD.csv"), &daily()).unwrap();
        let mut bad = fs::File::create(dir.path().join("BAD.csv")).unwrap();
        writeln!(bad, "when,open,high,low,close,volume").unwrap();
        writeln!(bad, "2024-01-02,1,1,1,1,1").unwrap();

        let summary = resample_directory(dir.path()).unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped, vec!["BAD".to_string()]);

        let weekly = dir.path().join("weekly").join("GOOD.csv");
        let mut reader = csv::Reader::from_path(&weekly).unwrap();
        assert_eq!(read_candles(&mut reader).unwrap().len(), 2);
        assert!(dir.path().join("monthly").join("GOOD.csv").exists());
        assert!(!dir.path().join("weekly").join("BAD.csv").exists());
    }
}
