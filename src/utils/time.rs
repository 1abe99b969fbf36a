//! Time utilities: parsing HH:MM clock strings and formatting volumes.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Validate an `HH:MM` clock string and return it normalized (zero padded).
pub fn normalize_clock(t: &str) -> AppResult<String> {
    let parsed = parse_time(t.trim()).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
    Ok(parsed.format("%H:%M").to_string())
}

/// "1.25 L" above a litre, "250 mL" below.
pub fn format_volume(ml: i64) -> String {
    if ml.abs() >= 1000 {
        format!("{:.2} L", ml as f64 / 1000.0)
    } else {
        format!("{} mL", ml)
    }
}

/// Reminder interval in a human friendly form: "45 min", "2h", "1h 30m".
pub fn format_interval(minutes: i32) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    match (h, m) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {:02}m", h, m),
    }
}
