use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

/// Largest single intake accepted, in millilitres (32-bit range).
pub const MAX_INTAKE_ML: i64 = i32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeEvent {
    pub id: i64,        // ⇔ intake_events.id (AUTOINCREMENT)
    pub amount_ml: i64, // ⇔ intake_events.amount_ml (> 0)
    pub timestamp: i64, // ⇔ intake_events.timestamp (epoch milliseconds)
}

impl IntakeEvent {
    /// Event time in the local timezone.
    ///
    /// Timestamps outside chrono's range fall back to the Unix epoch.
    pub fn local_time(&self) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or_else(|| DateTime::<Local>::from(std::time::UNIX_EPOCH))
    }

    pub fn time_str(&self) -> String {
        self.local_time().format("%H:%M").to_string()
    }

    pub fn date_time_str(&self) -> String {
        self.local_time().format("%Y-%m-%d %H:%M").to_string()
    }
}
