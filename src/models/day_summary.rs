use super::intake::IntakeEvent;
use chrono::NaiveDate;
use serde::Serialize;

/// All intake events of one local calendar day, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub label: String, // "Today", "Yesterday" or "Mar 05, 2026"
    pub total_ml: i64,
    pub events: Vec<IntakeEvent>,
}

/// Goal progress for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub total_ml: i64,
    pub goal_ml: i64,
    /// `total / goal`, clamped to `[0, 1]`. Zero when the goal is zero.
    pub ratio: f64,
}

impl Progress {
    pub fn new(total_ml: i64, goal_ml: i64) -> Self {
        let ratio = if goal_ml <= 0 {
            0.0
        } else {
            (total_ml as f64 / goal_ml as f64).clamp(0.0, 1.0)
        };
        Self {
            total_ml,
            goal_ml,
            ratio,
        }
    }

    pub fn percent(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }

    pub fn remaining_ml(&self) -> i64 {
        (self.goal_ml - self.total_ml).max(0)
    }
}
