use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle period of a price series
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Monthly => "monthly",
        }
    }

    /// Resampled candles live in a sub-directory next to the daily files
    pub fn subdirectory(&self) -> Option<&'static str> {
        match self {
            Timeframe::Daily => None,
            Timeframe::Weekly => Some("weekly"),
            Timeframe::Monthly => Some("monthly"),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
