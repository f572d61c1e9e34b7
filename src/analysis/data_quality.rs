use crate::config::DataQualityConfig;
use crate::models::DataQuality;

/// Tier purely by number of periods
pub fn classify_data_quality(rows: usize, config: &DataQualityConfig) -> DataQuality {
    if rows >= config.full_min_rows {
        DataQuality::Full
    } else if rows >= config.partial_min_rows {
        DataQuality::Partial
    } else {
        DataQuality::Limited
    }
}
