use crate::models::{IndicatorValues, Trend};

/// Strict ordering of close, sma20 and sma50 at the anchor period.
/// Ties, non-monotonic orderings and missing averages are all Sideways.
pub fn classify_trend(close: f64, sma20: Option<f64>, sma50: Option<f64>) -> Trend {
    let (Some(sma20), Some(sma50)) = (sma20, sma50) else {
        return Trend::Sideways;
    };

    if close > sma20 && sma20 > sma50 {
        Trend::Bullish
    } else if close < sma20 && sma20 < sma50 {
        Trend::Bearish
    } else {
        Trend::Sideways
    }
}

pub fn trend_of(close: f64, indicators: &IndicatorValues) -> Trend {
    classify_trend(close, indicators.sma20, indicators.sma50)
}
