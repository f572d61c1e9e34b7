use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Candle, Timeframe};

/// Three-state trend label from the close/sma20/sma50 ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Sideways,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Bullish => "Bullish",
            Trend::Bearish => "Bearish",
            Trend::Sideways => "Sideways",
        }
    }

    /// Bullish or Bearish: a readable setup either way
    pub fn is_directional(&self) -> bool {
        !matches!(self, Trend::Sideways)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sample-count sufficiency tier of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataQuality {
    Full,
    Partial,
    Limited,
}

impl DataQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::Full => "FULL",
            DataQuality::Partial => "PARTIAL",
            DataQuality::Limited => "LIMITED",
        }
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a confidence score was computed or forced to zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceStatus {
    Computed,
    MissingWeekly,
    MissingMonthly,
    MissingWeeklyMonthly,
}

impl ConfidenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceStatus::Computed => "computed",
            ConfidenceStatus::MissingWeekly => "missing_weekly",
            ConfidenceStatus::MissingMonthly => "missing_monthly",
            ConfidenceStatus::MissingWeeklyMonthly => "missing_weekly_monthly",
        }
    }

    pub fn from_missing(weekly_missing: bool, monthly_missing: bool) -> Option<Self> {
        match (weekly_missing, monthly_missing) {
            (false, false) => None,
            (true, false) => Some(ConfidenceStatus::MissingWeekly),
            (false, true) => Some(ConfidenceStatus::MissingMonthly),
            (true, true) => Some(ConfidenceStatus::MissingWeeklyMonthly),
        }
    }
}

/// Daily confidence in [0, 100]. A forced zero keeps its reason in `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confidence {
    pub score: u8,
    pub status: ConfidenceStatus,
}

impl Confidence {
    pub fn computed(score: u8) -> Self {
        Self {
            score: score.min(100),
            status: ConfidenceStatus::Computed,
        }
    }

    pub fn unassessable(status: ConfidenceStatus) -> Self {
        Self { score: 0, status }
    }

    pub fn is_computed(&self) -> bool {
        self.status == ConfidenceStatus::Computed
    }
}

/// Indicator Set evaluated at the anchor period. `None` = not enough history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    pub sma5: Option<f64>,
    pub sma9: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma120: Option<f64>,
    pub sma200: Option<f64>,
    pub ema20: Option<f64>,
    pub ema50: Option<f64>,
    pub vwap: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub rsi14: Option<f64>,
}

/// Floor-trader pivots, rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    pub pp: f64,
    pub r1: f64,
    pub r2: f64,
    pub s1: f64,
    pub s2: f64,
}

/// One computed summary record for a symbol at a timeframe.
/// Never mutated after construction; attaching a score yields a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Latest period of the series
    pub candle: Candle,
    pub indicators: IndicatorValues,

    // Distances of close, in percent
    pub sma5_dist_pct: Option<f64>,
    pub ema20_dist_pct: Option<f64>,
    pub vwap_dist_pct: Option<f64>,
    /// 0 at the middle band, ±1 at the outer bands
    pub bb_position: Option<f64>,

    pub pivots: PivotLevels,

    pub trend: Trend,
    pub mean_reversion_flag: bool,
    pub volatility_flag: bool,
    pub data_quality: DataQuality,

    /// Daily snapshots only, after the timeframe join
    pub confidence: Option<Confidence>,
}

impl Snapshot {
    pub fn with_confidence(self, confidence: Confidence) -> Self {
        Snapshot {
            confidence: Some(confidence),
            ..self
        }
    }

    pub fn close(&self) -> f64 {
        self.candle.close_price
    }
}
