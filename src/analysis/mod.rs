// Indicator computation, classification and scoring
pub mod confidence;
pub mod data_quality;
pub mod indicators;
pub mod risk_flags;
pub mod snapshot_builder;
pub mod trend;

// Re-export commonly used items
pub use confidence::{Alignment, CONFIDENCE_RULES, ConfidenceRule, confidence_score};
pub use data_quality::classify_data_quality;
pub use indicators::IndicatorSet;
pub use risk_flags::{RiskFlags, detect_risk_flags};
pub use snapshot_builder::build_snapshot;
pub use trend::classify_trend;
