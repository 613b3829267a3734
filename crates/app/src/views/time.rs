use chrono::{DateTime, Utc};

/// "just now", "5m ago", "3h ago", "2d ago", then a short date.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(then);
    let mins = diff.num_minutes();
    if mins < 1 {
        return "just now".to_string();
    }
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = diff.num_hours();
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = diff.num_days();
    if days < 7 {
        return format!("{days}d ago");
    }
    format_date_short(then)
}

pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%b %-d, %Y, %H:%M").to_string()
}

pub fn format_date_short(value: DateTime<Utc>) -> String {
    value.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{format_date, format_relative};

    #[test]
    fn relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_relative(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_relative(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_relative(now - Duration::days(30), now), "Jul 7");
    }

    #[test]
    fn future_timestamps_read_as_just_now() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        assert_eq!(format_relative(now + Duration::minutes(10), now), "just now");
    }

    #[test]
    fn full_date_format() {
        let value = Utc.with_ymd_and_hms(2026, 1, 5, 9, 4, 0).unwrap();
        assert_eq!(format_date(value), "Jan 5, 2026, 09:04");
    }
}
