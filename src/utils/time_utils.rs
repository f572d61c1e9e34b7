use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &'static str = "%Y-%m-%d";
    // Vendor timestamp layouts
    const DATETIME_FORMATS: &'static [&'static str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    const OFFSET_FORMATS: &'static [&'static str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"];
}

/// Parse a calendar date, dropping any time-of-day and timezone (wall-clock date is kept).
/// Returns `None` for anything unparseable; callers decide whether that rejects or drops.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, TimeUtils::STANDARD_TIME_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local().date());
    }
    for fmt in TimeUtils::OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Some(dt.naive_local().date());
        }
    }
    for fmt in TimeUtils::DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    None
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

/// Friday closing the week `date` falls in (Saturday/Sunday roll to the next Friday)
pub fn week_ending_friday(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_monday() as i64;
    let days_to_friday = (4 - weekday).rem_euclid(7);
    date + Duration::days(days_to_friday)
}

/// Last calendar day of the month `date` falls in
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // Day 1 of any month always exists
    let first_of_next = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);
    first_of_next - Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_and_timestamped_dates() {
        assert_eq!(parse_date("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date(" 2024-01-05 00:00:00 "), Some(ymd(2024, 1, 5)));
        assert_eq!(
            parse_date("2024-01-05 00:00:00+05:30"),
            Some(ymd(2024, 1, 5))
        );
        assert_eq!(parse_date("2024-01-05T09:15:00Z"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date("05/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn weeks_end_on_friday() {
        // 2024-01-01 is a Monday
        assert_eq!(week_ending_friday(ymd(2024, 1, 1)), ymd(2024, 1, 5));
        assert_eq!(week_ending_friday(ymd(2024, 1, 5)), ymd(2024, 1, 5));
        assert_eq!(week_ending_friday(ymd(2024, 1, 6)), ymd(2024, 1, 12));
        assert_eq!(week_ending_friday(ymd(2024, 1, 7)), ymd(2024, 1, 12));
    }

    #[test]
    fn month_end_handles_leap_years_and_december() {
        assert_eq!(month_end(ymd(2024, 2, 10)), ymd(2024, 2, 29));
        assert_eq!(month_end(ymd(2023, 12, 1)), ymd(2023, 12, 31));
        assert_eq!(month_end(ymd(2023, 4, 30)), ymd(2023, 4, 30));
    }
}
