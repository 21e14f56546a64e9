//! Human-readable rendering of overdue durations.
//!
//! Months are a fixed 30 days here, not calendar months. The same bucket
//! size drives `MaintenanceDue::overdue_months`, so both stay consistent
//! with what residents have always been shown.

/// Days counted as one month when bucketing overdue durations
pub const DAYS_PER_MONTH: i64 = 30;

/// Format a number of days as "N months, M days".
///
/// Zero and negative inputs render as "0 days".
pub fn format_duration(days: i64) -> String {
    if days <= 0 {
        return "0 days".to_string();
    }

    let months = days / DAYS_PER_MONTH;
    let remaining_days = days % DAYS_PER_MONTH;

    if months == 0 {
        return pluralize(remaining_days, "day");
    }
    if remaining_days == 0 {
        return pluralize(months, "month");
    }

    format!("{}, {}", pluralize(months, "month"), pluralize(remaining_days, "day"))
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative() {
        assert_eq!(format_duration(0), "0 days");
        assert_eq!(format_duration(-5), "0 days");
    }

    #[test]
    fn test_days_only() {
        assert_eq!(format_duration(1), "1 day");
        assert_eq!(format_duration(2), "2 days");
        assert_eq!(format_duration(29), "29 days");
    }

    #[test]
    fn test_whole_months() {
        assert_eq!(format_duration(30), "1 month");
        assert_eq!(format_duration(60), "2 months");
        assert_eq!(format_duration(360), "12 months");
    }

    #[test]
    fn test_months_and_days() {
        assert_eq!(format_duration(31), "1 month, 1 day");
        assert_eq!(format_duration(45), "1 month, 15 days");
        assert_eq!(format_duration(61), "2 months, 1 day");
        assert_eq!(format_duration(95), "3 months, 5 days");
    }

    #[test]
    fn test_month_is_thirty_days_not_calendar() {
        // 365 days is 12 buckets of 30 plus 5, not "1 year"
        assert_eq!(format_duration(365), "12 months, 5 days");
    }
}
