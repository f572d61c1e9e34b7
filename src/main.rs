use anyhow::{Context, Result};
use clap::Parser;

use market_snapshots::data::{normalize_directory, resample_directory, write_universe_report};
use market_snapshots::{Cli, Command, Universe, run_snapshots};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Dispatch
    match &args.command {
        Command::Snapshots { .. } => {
            let config = args
                .aggregator_config()?
                .context("snapshots command without configuration")?;
            log::info!("🚀 Building snapshots from {}", config.data_dir.display());
            let report = run_snapshots(config)?;
            report.log_summary();
        }
        Command::Candles => {
            for dir in args.universe_dirs() {
                if !dir.is_dir() {
                    log::warn!("⚠️  {} not found, skipping", dir.display());
                    continue;
                }
                let summary = resample_directory(&dir)?;
                log::info!(
                    "✅ {}: {} resampled, {} skipped",
                    dir.display(),
                    summary.processed,
                    summary.skipped.len()
                );
            }
        }
        Command::Coverage { report_dir } => {
            for universe in [Universe::Stocks, Universe::Indices] {
                write_universe_report(&args.data_dir, report_dir, universe)?;
            }
        }
        Command::Normalize => {
            for dir in args.universe_dirs() {
                if !dir.is_dir() {
                    log::warn!("⚠️  {} not found, skipping", dir.display());
                    continue;
                }
                let summary = normalize_directory(&dir)?;
                log::info!(
                    "🧹 {}: {} files normalized, {} rows dropped, {} skipped",
                    dir.display(),
                    summary.normalized,
                    summary.rows_dropped,
                    summary.skipped.len()
                );
            }
        }
    }

    Ok(())
}
