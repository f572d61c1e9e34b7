use chrono::NaiveDate;

// One OHLCV period of a price series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    pub volume: f64,
}

impl Candle {
    // A constructor for convenience
    pub fn new(
        date: NaiveDate,
        open_price: f64,
        high_price: f64,
        low_price: f64,
        close_price: f64,
        volume: f64,
    ) -> Self {
        Candle {
            date,
            open_price,
            high_price,
            low_price,
            close_price,
            volume,
        }
    }

    // (high + low + close) / 3, the price VWAP and pivots are built from
    pub fn typical_price(&self) -> f64 {
        (self.high_price + self.low_price + self.close_price) / 3.0
    }

    // High to low distance of the period
    pub fn range(&self) -> f64 {
        self.high_price - self.low_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_price_and_range() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let candle = Candle::new(date, 100.0, 110.0, 95.0, 105.0, 1_000.0);
        assert!((candle.typical_price() - 103.333_333).abs() < 1e-4);
        assert_eq!(candle.range(), 15.0);
    }
}
