//! SQL for the `reminder_schedule` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub task_name: String,
    pub period_minutes: i64,
    pub title: String,
    pub body: String,
    pub registered_at: String,
}

/// Register `task_name`, replacing any earlier registration with the same name.
pub fn replace_schedule(
    conn: &Connection,
    task_name: &str,
    period_minutes: i64,
    title: &str,
    body: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO reminder_schedule (task_name, period_minutes, title, body, registered_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![task_name, period_minutes, title, body, Local::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Returns whether a registration existed.
pub fn delete_schedule(conn: &Connection, task_name: &str) -> AppResult<bool> {
    let n = conn.execute(
        "DELETE FROM reminder_schedule WHERE task_name = ?1",
        [task_name],
    )?;
    Ok(n > 0)
}

pub fn load_schedule(conn: &Connection, task_name: &str) -> AppResult<Option<ScheduleRow>> {
    let row = conn
        .query_row(
            "SELECT task_name, period_minutes, title, body, registered_at
             FROM reminder_schedule WHERE task_name = ?1",
            [task_name],
            |row| {
                Ok(ScheduleRow {
                    task_name: row.get(0)?,
                    period_minutes: row.get(1)?,
                    title: row.get(2)?,
                    body: row.get(3)?,
                    registered_at: row.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}
