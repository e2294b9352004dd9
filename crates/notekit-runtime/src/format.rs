use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Short date for comment lists: `MM-DD` within `now`'s year, `YYYY-MM-DD`
/// otherwise. Empty or unparseable input yields an empty string.
pub fn format_comment_time<Tz: TimeZone>(raw: &str, now: &DateTime<Tz>) -> String {
    let Some(date) = parse_date(raw.trim(), &now.timezone()) else {
        return String::new();
    };

    if date.year() == now.year() {
        date.format("%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// [`format_comment_time`] against the local clock.
pub fn format_comment_time_now(raw: &str) -> String {
    format_comment_time(raw, &Local::now())
}

fn parse_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(tz).date_naive());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(naive.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
