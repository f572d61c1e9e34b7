use crate::config::RiskFlagConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RiskFlags {
    /// Close stretched too far from sma5
    pub mean_reversion: bool,
    /// Close outside the Bollinger bands
    pub volatility: bool,
}

/// Both flags are independent; an absent input never raises a flag.
pub fn detect_risk_flags(
    sma5_dist_pct: Option<f64>,
    bb_position: Option<f64>,
    config: &RiskFlagConfig,
) -> RiskFlags {
    RiskFlags {
        mean_reversion: sma5_dist_pct.is_some_and(|d| d.abs() > config.mean_reversion_pct),
        volatility: bb_position.is_some_and(|p| p.abs() > config.volatility_band_position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;

    #[test]
    fn thresholds_are_strict() {
        let cfg = ANALYSIS.risk_flags;
        assert!(!detect_risk_flags(Some(1.2), Some(1.0), &cfg).mean_reversion);
        assert!(!detect_risk_flags(Some(1.2), Some(1.0), &cfg).volatility);

        let flags = detect_risk_flags(Some(-1.3), Some(-1.01), &cfg);
        assert!(flags.mean_reversion);
        assert!(flags.volatility);
    }

    #[test]
    fn absent_inputs_raise_nothing() {
        let flags = detect_risk_flags(None, None, &ANALYSIS.risk_flags);
        assert_eq!(flags, RiskFlags::default());
    }
}
