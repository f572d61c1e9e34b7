//! Indicator and scoring configuration

/// Windows used by the indicator engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    // Simple moving averages. Snapshot fields are matched by period (sma5 <- 5), not position.
    pub sma_windows: [usize; 6],
    // Exponential moving averages: 20, 50 periods
    pub ema_windows: [usize; 2],
    pub rsi_window: usize,
    pub bollinger_window: usize,
    // Band half-width in standard deviations
    pub bollinger_k: f64,
}

/// Thresholds for the boolean risk flags
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFlagConfig {
    /// |sma5_dist_pct| above this (percent) marks the close as overextended
    pub mean_reversion_pct: f64,
    /// |bb_position| above this means the close sits outside the bands
    pub volatility_band_position: f64,
}

/// Row-count thresholds for data-quality tiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataQualityConfig {
    pub full_min_rows: usize,
    pub partial_min_rows: usize,
}

/// A capped linear penalty: `min(|value| * per_unit, cap)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedPenalty {
    pub per_unit: f64,
    pub cap: f64,
}

impl CappedPenalty {
    pub fn apply(&self, value: f64) -> f64 {
        (value.abs() * self.per_unit).min(self.cap)
    }
}

/// Weights of the multi-timeframe confidence score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub base: f64,

    // Trend clarity (asymmetric: ambiguity costs more than clarity earns)
    pub clear_trend_bonus: f64,
    pub sideways_penalty: f64,

    // Overextension, daily distances only
    pub sma5_distance: CappedPenalty,
    pub ema20_distance: CappedPenalty,
    pub vwap_distance: CappedPenalty,

    // Flag penalties
    pub mean_reversion_penalty: f64,
    pub volatility_penalty: f64,

    // Cross-timeframe alignment
    pub perfect_alignment_bonus: f64,
    pub major_conflict_penalty: f64,
    pub partial_conflict_penalty: f64,

    // Daily data quality
    pub partial_quality_penalty: f64,
    pub limited_quality_penalty: f64,

    pub min_score: f64,
    pub max_score: f64,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub indicators: IndicatorConfig,
    pub risk_flags: RiskFlagConfig,
    pub data_quality: DataQualityConfig,
    pub scoring: ScoringConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        ANALYSIS
    }
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    indicators: IndicatorConfig {
        sma_windows: [5, 9, 20, 50, 120, 200],
        ema_windows: [20, 50],
        rsi_window: 14,
        bollinger_window: 20,
        bollinger_k: 2.0,
    },

    risk_flags: RiskFlagConfig {
        mean_reversion_pct: 1.2,
        volatility_band_position: 1.0,
    },

    data_quality: DataQualityConfig {
        full_min_rows: 200,
        partial_min_rows: 60,
    },

    scoring: ScoringConfig {
        base: 60.0,

        clear_trend_bonus: 20.0,
        sideways_penalty: 25.0,

        sma5_distance: CappedPenalty {
            per_unit: 5.0,
            cap: 20.0,
        },
        ema20_distance: CappedPenalty {
            per_unit: 4.0,
            cap: 15.0,
        },
        vwap_distance: CappedPenalty {
            per_unit: 3.0,
            cap: 15.0,
        },

        mean_reversion_penalty: 15.0,
        volatility_penalty: 10.0,

        perfect_alignment_bonus: 10.0,
        major_conflict_penalty: 30.0,
        partial_conflict_penalty: 15.0,

        partial_quality_penalty: 10.0,
        limited_quality_penalty: 25.0,

        min_score: 0.0,
        max_score: 100.0,
    },
};
