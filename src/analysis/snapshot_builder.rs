use anyhow::{Result, anyhow};

use crate::analysis::data_quality::classify_data_quality;
use crate::analysis::indicators::{IndicatorSet, pivot_levels};
use crate::analysis::risk_flags::detect_risk_flags;
use crate::analysis::trend::trend_of;
use crate::config::AnalysisConfig;
use crate::models::{PriceSeries, Snapshot};
use crate::utils::maths_utils::{defined, pct_distance};

/// Normalized position of close inside the Bollinger envelope.
/// Zero band width (flat prices) is defined as position 0.
pub fn bb_position(close: f64, bb_middle: Option<f64>, bb_upper: Option<f64>) -> Option<f64> {
    let (middle, upper) = (bb_middle?, bb_upper?);
    let half_width = upper - middle;
    if half_width == 0.0 {
        return Some(0.0);
    }
    defined((close - middle) / half_width)
}

/// Build the snapshot of `series` at its latest period.
/// Data quality is tiered on the very series the indicators are computed on.
pub fn build_snapshot(series: &PriceSeries, config: &AnalysisConfig) -> Result<Snapshot> {
    let anchor = series
        .last_candle()
        .ok_or_else(|| anyhow!("{}: empty {} series", series.symbol, series.timeframe))?;
    let anchor_idx = series.klines() - 1;

    let indicator_set = IndicatorSet::compute(series, &config.indicators);
    let indicators = indicator_set.values_at(anchor_idx);

    let close = anchor.close_price;
    let sma5_dist_pct = pct_distance(close, indicators.sma5);
    let ema20_dist_pct = pct_distance(close, indicators.ema20);
    let vwap_dist_pct = pct_distance(close, indicators.vwap);
    let position = bb_position(close, indicators.bb_middle, indicators.bb_upper);

    let flags = detect_risk_flags(sma5_dist_pct, position, &config.risk_flags);

    Ok(Snapshot {
        symbol: series.symbol.clone(),
        timeframe: series.timeframe,
        candle: anchor,
        indicators,
        sma5_dist_pct,
        ema20_dist_pct,
        vwap_dist_pct,
        bb_position: position,
        pivots: pivot_levels(&anchor),
        trend: trend_of(close, &indicators),
        mean_reversion_flag: flags.mean_reversion,
        volatility_flag: flags.volatility,
        data_quality: classify_data_quality(series.klines(), &config.data_quality),
        confidence: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;
    use crate::domain::{Candle, Timeframe};
    use crate::models::{DataQuality, Trend};
    use chrono::{Duration, NaiveDate};

    fn series_from_closes(symbol: &str, closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2022, 1, 3).unwrap();
        let candles: Vec<Candle> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Candle::new(
                    start + Duration::days(i as i64),
                    c,
                    c + 1.0,
                    c - 1.0,
                    c,
                    1_000.0,
                )
            })
            .collect();
        PriceSeries::from_candles(symbol, Timeframe::Daily, &candles).unwrap()
    }

    #[test]
    fn flat_bands_give_zero_position() {
        assert_eq!(bb_position(105.0, Some(100.0), Some(100.0)), Some(0.0));
        assert_eq!(bb_position(105.0, None, Some(100.0)), None);
        assert_eq!(bb_position(110.0, Some(100.0), Some(105.0)), Some(2.0));
    }

    #[test]
    fn rising_series_snapshot() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64 * 0.5).collect();
        let series = series_from_closes("NIFTY50", &closes);
        let snapshot = build_snapshot(&series, &ANALYSIS).unwrap();

        assert_eq!(snapshot.symbol, "NIFTY50");
        assert_eq!(snapshot.candle.close_price, 224.5);
        assert_eq!(snapshot.trend, Trend::Bullish);
        assert_eq!(snapshot.data_quality, DataQuality::Full);
        assert!(snapshot.indicators.sma200.is_some());
        // sma5 = 223.5 => +0.447%
        let d = snapshot.sma5_dist_pct.unwrap();
        assert!((d - (1.0 / 223.5 * 100.0)).abs() < 1e-9);
        assert!(!snapshot.mean_reversion_flag);
        assert!(snapshot.confidence.is_none());
        // pivots from 225.5 / 223.5 / 224.5
        assert_eq!(snapshot.pivots.pp, 224.5);
        assert_eq!(snapshot.pivots.r2, 226.5);
    }

    #[test]
    fn flat_series_hits_the_zero_width_band_policy() {
        let series = series_from_closes("FLAT", &[50.0; 80]);
        let snapshot = build_snapshot(&series, &ANALYSIS).unwrap();

        assert_eq!(snapshot.bb_position, Some(0.0));
        assert!(!snapshot.volatility_flag);
        assert_eq!(snapshot.trend, Trend::Sideways);
        assert_eq!(snapshot.data_quality, DataQuality::Partial);
        assert_eq!(snapshot.sma5_dist_pct, Some(0.0));
    }

    #[test]
    fn short_series_has_absent_indicators_and_limited_quality() {
        let series = series_from_closes("NEW", &[10.0, 11.0, 12.0]);
        let snapshot = build_snapshot(&series, &ANALYSIS).unwrap();

        assert_eq!(snapshot.indicators.sma5, None);
        assert_eq!(snapshot.sma5_dist_pct, None);
        assert_eq!(snapshot.bb_position, None);
        assert!(snapshot.vwap_dist_pct.is_some());
        assert!(!snapshot.mean_reversion_flag);
        assert_eq!(snapshot.trend, Trend::Sideways);
        assert_eq!(snapshot.data_quality, DataQuality::Limited);
    }

    #[test]
    fn spike_raises_both_flags() {
        let mut closes = vec![100.0; 40];
        closes.push(110.0);
        let series = series_from_closes("SPIKE", &closes);
        let snapshot = build_snapshot(&series, &ANALYSIS).unwrap();

        assert!(snapshot.mean_reversion_flag);
        assert!(snapshot.volatility_flag);
    }

    #[test]
    fn empty_series_is_an_error() {
        let series = PriceSeries::from_candles("NONE", Timeframe::Daily, &[]).unwrap();
        assert!(build_snapshot(&series, &ANALYSIS).is_err());
    }

    #[test]
    fn source_series_is_untouched() {
        let series = series_from_closes("SAME", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let before = series.clone();
        build_snapshot(&series, &ANALYSIS).unwrap();
        assert_eq!(series, before);
    }
}
