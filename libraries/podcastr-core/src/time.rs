//! Display formatting for durations and publication dates

use chrono::{DateTime, Locale, Utc};

/// Format whole seconds as `mm:ss`, or `hh:mm:ss` from one hour up
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format a publication date as `d MMM yy` with Brazilian Portuguese month names
pub fn format_published_at(date: &DateTime<Utc>) -> String {
    date.format_localized("%-d %b %y", Locale::pt_BR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(61), "01:01");
        assert_eq!(format_duration(3599), "59:59");
    }

    #[test]
    fn widens_to_hours() {
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3981), "01:06:21");
        assert_eq!(format_duration(36_000), "10:00:00");
    }

    #[test]
    fn published_date_uses_short_portuguese_month() {
        let date = Utc.with_ymd_and_hms(2021, 2, 8, 9, 0, 0).unwrap();
        assert_eq!(format_published_at(&date), "8 fev 21");
    }
}
