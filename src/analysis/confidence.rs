//! Multi-timeframe confidence score.
//!
//! A direction-neutral measure of setup quality: a clear daily trend that is
//! not overextended, agrees with the weekly and monthly trends and is backed by
//! enough history scores high, whether it points up or down.
//!
//! The score starts at a neutral base and applies [`CONFIDENCE_RULES`] in order.
//! Each rule contributes one bounded delta, so every rule can be inspected and
//! tested on its own. The sum is rounded (ties to even) and clamped to [0, 100].

use crate::config::{CappedPenalty, ScoringConfig};
use crate::models::{Confidence, ConfidenceStatus, DataQuality, Snapshot, Trend};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Daily snapshot together with its same-symbol companions
#[derive(Debug, Clone, Copy)]
pub struct TimeframeSet<'a> {
    pub daily: &'a Snapshot,
    pub weekly: &'a Snapshot,
    pub monthly: &'a Snapshot,
}

/// How the daily trend relates to the higher timeframes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Daily, weekly and monthly share one directional trend
    Perfect,
    /// Daily disagrees with a directional monthly trend
    MajorConflict,
    /// Daily disagrees with a directional weekly trend (monthly is fine)
    PartialConflict,
    Neutral,
}

impl Alignment {
    /// First match wins: a major conflict masks any partial conflict.
    pub fn classify(daily: Trend, weekly: Trend, monthly: Trend) -> Self {
        if daily == weekly && weekly == monthly && daily.is_directional() {
            Alignment::Perfect
        } else if daily != monthly && monthly.is_directional() {
            Alignment::MajorConflict
        } else if daily != weekly && weekly.is_directional() {
            Alignment::PartialConflict
        } else {
            Alignment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceRule {
    TrendClarity,
    Overextension,
    RiskFlags,
    TimeframeAlignment,
    DataQuality,
}

/// Evaluation order of the score
pub const CONFIDENCE_RULES: [ConfidenceRule; 5] = [
    ConfidenceRule::TrendClarity,
    ConfidenceRule::Overextension,
    ConfidenceRule::RiskFlags,
    ConfidenceRule::TimeframeAlignment,
    ConfidenceRule::DataQuality,
];

impl ConfidenceRule {
    pub fn name(&self) -> &'static str {
        match self {
            ConfidenceRule::TrendClarity => "trend_clarity",
            ConfidenceRule::Overextension => "overextension",
            ConfidenceRule::RiskFlags => "risk_flags",
            ConfidenceRule::TimeframeAlignment => "timeframe_alignment",
            ConfidenceRule::DataQuality => "data_quality",
        }
    }

    /// Signed contribution of this rule
    pub fn delta(&self, set: &TimeframeSet, config: &ScoringConfig) -> f64 {
        let daily = set.daily;
        match self {
            ConfidenceRule::TrendClarity => {
                if daily.trend.is_directional() {
                    config.clear_trend_bonus
                } else {
                    -config.sideways_penalty
                }
            }
            ConfidenceRule::Overextension => {
                // Absent distances cost nothing; each cap is independent
                let penalty = |dist: Option<f64>, rule: &CappedPenalty| {
                    dist.map_or(0.0, |d| rule.apply(d))
                };
                -(penalty(daily.sma5_dist_pct, &config.sma5_distance)
                    + penalty(daily.ema20_dist_pct, &config.ema20_distance)
                    + penalty(daily.vwap_dist_pct, &config.vwap_distance))
            }
            ConfidenceRule::RiskFlags => {
                let mut delta = 0.0;
                if daily.mean_reversion_flag {
                    delta -= config.mean_reversion_penalty;
                }
                if daily.volatility_flag {
                    delta -= config.volatility_penalty;
                }
                delta
            }
            ConfidenceRule::TimeframeAlignment => {
                match Alignment::classify(daily.trend, set.weekly.trend, set.monthly.trend) {
                    Alignment::Perfect => config.perfect_alignment_bonus,
                    Alignment::MajorConflict => -config.major_conflict_penalty,
                    Alignment::PartialConflict => -config.partial_conflict_penalty,
                    Alignment::Neutral => 0.0,
                }
            }
            ConfidenceRule::DataQuality => match daily.data_quality {
                DataQuality::Full => 0.0,
                DataQuality::Partial => -config.partial_quality_penalty,
                DataQuality::Limited => -config.limited_quality_penalty,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub deltas: Vec<(ConfidenceRule, f64)>,
    /// Base plus all deltas, before rounding and clamping
    pub raw: f64,
    pub score: u8,
}

/// Round half to even, clamp, and map non-finite input to the floor
fn finalize(raw: f64, config: &ScoringConfig) -> u8 {
    if !raw.is_finite() {
        return config.min_score as u8;
    }
    raw.round_ties_even()
        .clamp(config.min_score, config.max_score) as u8
}

pub fn score_breakdown(set: &TimeframeSet, config: &ScoringConfig) -> ScoreBreakdown {
    let deltas: Vec<(ConfidenceRule, f64)> = CONFIDENCE_RULES
        .iter()
        .map(|rule| (*rule, rule.delta(set, config)))
        .collect();
    let raw = config.base + deltas.iter().map(|(_, d)| d).sum::<f64>();

    ScoreBreakdown {
        base: config.base,
        deltas,
        raw,
        score: finalize(raw, config),
    }
}

/// Confidence of a daily snapshot. Without both companions the score is forced to 0
/// and the status records which timeframe was missing.
pub fn confidence_score(
    daily: &Snapshot,
    weekly: Option<&Snapshot>,
    monthly: Option<&Snapshot>,
    config: &ScoringConfig,
) -> Confidence {
    let (Some(weekly), Some(monthly)) = (weekly, monthly) else {
        let status = ConfidenceStatus::from_missing(weekly.is_none(), monthly.is_none())
            .unwrap_or(ConfidenceStatus::MissingWeeklyMonthly);
        return Confidence::unassessable(status);
    };

    let breakdown = score_breakdown(
        &TimeframeSet {
            daily,
            weekly,
            monthly,
        },
        config,
    );

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_rule_breakdown {
        let parts: Vec<String> = breakdown
            .deltas
            .iter()
            .map(|(rule, d)| format!("{} {:+.2}", rule.name(), d))
            .collect();
        log::debug!(
            "{}: base {} | {} => {:.2} -> {}",
            daily.symbol,
            breakdown.base,
            parts.join(" | "),
            breakdown.raw,
            breakdown.score
        );
    }

    Confidence::computed(breakdown.score)
}
