//! Local calendar helpers.
//!
//! "Today" always means the local calendar day of the device at the moment of
//! the call. Nothing here caches a timezone or a day boundary.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First instant of `date` in the local timezone.
///
/// When midnight does not exist (a DST jump at 00:00) the first valid instant
/// after it is used; when it is ambiguous the earliest one wins.
pub fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let mut naive = date.and_time(NaiveTime::MIN);
    for _ in 0..24 * 4 {
        if let Some(dt) = Local.from_local_datetime(&naive).earliest() {
            return dt;
        }
        naive += Duration::minutes(15);
    }
    // No zone skips a whole day; treat the date as UTC as a last resort.
    DateTime::<Local>::from(date.and_time(NaiveTime::MIN).and_utc())
}

/// Epoch milliseconds of the start of `date`.
pub fn start_of_day_ms(date: NaiveDate) -> i64 {
    local_midnight(date).timestamp_millis()
}

/// Epoch milliseconds of the start of the current local day.
pub fn start_of_today_ms() -> i64 {
    start_of_day_ms(today())
}

/// Half-open `[start, end)` window covering `date`.
pub fn day_window_ms(date: NaiveDate) -> (i64, i64) {
    let start = start_of_day_ms(date);
    let end = date
        .succ_opt()
        .map(start_of_day_ms)
        .unwrap_or(i64::MAX);
    (start, end)
}

/// Next local midnight strictly after `now`.
pub fn next_midnight(now: DateTime<Local>) -> DateTime<Local> {
    match now.date_naive().succ_opt() {
        Some(tomorrow) => local_midnight(tomorrow),
        None => now + Duration::days(1),
    }
}

/// Time left until the next local midnight. Never zero, so a timer armed on
/// it always makes progress.
pub fn until_next_midnight(now: DateTime<Local>) -> std::time::Duration {
    (next_midnight(now) - now)
        .to_std()
        .unwrap_or(std::time::Duration::from_secs(1))
        .max(std::time::Duration::from_millis(1))
}

/// Date of an epoch-millisecond timestamp in the local timezone.
pub fn local_date_of(ts_ms: i64) -> NaiveDate {
    Local
        .timestamp_millis_opt(ts_ms)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or(NaiveDate::MIN)
}

/// "Today", "Yesterday", otherwise e.g. "Mar 05, 2026".
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%b %d, %Y").to_string()
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse `YYYY-MM-DD HH:MM` as a local date-time into epoch milliseconds.
pub fn parse_local_datetime_ms(s: &str) -> Option<i64> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M").ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
