use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::domain::{Candle, Timeframe};

// ============================================================================
// PriceSeries: ordered OHLCV history of one symbol at one timeframe
// ============================================================================

/// Column-oriented so the indicator engine can work on plain slices.
/// Dates are strictly increasing; gaps are allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub symbol: String,
    pub timeframe: Timeframe,

    pub dates: Vec<NaiveDate>,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    pub volumes: Vec<f64>,
}

impl PriceSeries {
    /// Build from candles already sorted by date. Rejects out-of-order or duplicate dates,
    /// non-finite prices and negative volume.
    pub fn from_candles(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        candles: &[Candle],
    ) -> Result<Self> {
        let symbol = symbol.into();

        for (idx, candle) in candles.iter().enumerate() {
            let prices = [
                candle.open_price,
                candle.high_price,
                candle.low_price,
                candle.close_price,
            ];
            if prices.iter().any(|p| !p.is_finite()) {
                bail!("{}: non-finite price on {}", symbol, candle.date);
            }
            if !candle.volume.is_finite() || candle.volume < 0.0 {
                bail!("{}: invalid volume {} on {}", symbol, candle.volume, candle.date);
            }
            if idx > 0 && candles[idx - 1].date >= candle.date {
                bail!(
                    "{}: dates not strictly increasing ({} then {})",
                    symbol,
                    candles[idx - 1].date,
                    candle.date
                );
            }
        }

        Ok(PriceSeries {
            symbol,
            timeframe,
            dates: candles.iter().map(|c| c.date).collect(),
            open_prices: candles.iter().map(|c| c.open_price).collect(),
            high_prices: candles.iter().map(|c| c.high_price).collect(),
            low_prices: candles.iter().map(|c| c.low_price).collect(),
            close_prices: candles.iter().map(|c| c.close_price).collect(),
            volumes: candles.iter().map(|c| c.volume).collect(),
        })
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.dates[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    /// Number of periods
    pub fn klines(&self) -> usize {
        self.close_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_prices.is_empty()
    }

    /// The anchor period snapshots are taken at
    pub fn last_candle(&self) -> Option<Candle> {
        self.klines().checked_sub(1).map(|idx| self.get_candle(idx))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn candles(&self) -> impl Iterator<Item = Candle> + '_ {
        (0..self.klines()).map(|idx| self.get_candle(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn columns_follow_candle_order() {
        let candles = vec![
            Candle::new(day(1), 10.0, 11.0, 9.0, 10.5, 100.0),
            Candle::new(day(4), 10.5, 12.0, 10.0, 11.5, 150.0),
        ];
        let series = PriceSeries::from_candles("NIFTY50", Timeframe::Daily, &candles).unwrap();

        assert_eq!(series.klines(), 2);
        assert_eq!(series.close_prices, vec![10.5, 11.5]);
        assert_eq!(series.last_candle(), Some(candles[1]));
        assert_eq!(series.first_date(), Some(day(1)));
        assert_eq!(series.candles().count(), 2);
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let candles = vec![
            Candle::new(day(1), 10.0, 11.0, 9.0, 10.5, 100.0),
            Candle::new(day(1), 10.5, 12.0, 10.0, 11.5, 150.0),
        ];
        assert!(PriceSeries::from_candles("X", Timeframe::Daily, &candles).is_err());
    }

    #[test]
    fn negative_volume_is_rejected() {
        let candles = vec![Candle::new(day(1), 10.0, 11.0, 9.0, 10.5, -1.0)];
        let err = PriceSeries::from_candles("X", Timeframe::Daily, &candles).unwrap_err();
        assert!(err.to_string().contains("invalid volume"));
    }

    #[test]
    fn empty_series_has_no_anchor() {
        let series = PriceSeries::from_candles("X", Timeframe::Weekly, &[]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.last_candle(), None);
    }
}
