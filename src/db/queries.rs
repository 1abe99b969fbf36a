//! SQL for the `intake_events` table.

use crate::errors::AppResult;
use crate::models::intake::IntakeEvent;
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<IntakeEvent> {
    Ok(IntakeEvent {
        id: row.get("id")?,
        amount_ml: row.get("amount_ml")?,
        timestamp: row.get("timestamp")?,
    })
}

pub fn insert_event(conn: &Connection, amount_ml: i64, timestamp: i64) -> AppResult<IntakeEvent> {
    conn.execute(
        "INSERT INTO intake_events (amount_ml, timestamp) VALUES (?1, ?2)",
        params![amount_ml, timestamp],
    )?;

    Ok(IntakeEvent {
        id: conn.last_insert_rowid(),
        amount_ml,
        timestamp,
    })
}

/// Delete by id. Returns the number of removed rows (0 or 1).
pub fn delete_event(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM intake_events WHERE id = ?1", [id])?;
    Ok(n)
}

pub fn delete_all_events(conn: &Connection) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM intake_events", [])?;
    Ok(n)
}

pub fn load_all_events(conn: &Connection) -> AppResult<Vec<IntakeEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, amount_ml, timestamp FROM intake_events
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Events with `start <= timestamp < end`, newest first.
pub fn load_events_in_window(conn: &Connection, start: i64, end: i64) -> AppResult<Vec<IntakeEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, amount_ml, timestamp FROM intake_events
         WHERE timestamp >= ?1 AND timestamp < ?2
         ORDER BY timestamp DESC, id DESC",
    )?;

    let rows = stmt.query_map(params![start, end], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sum of `amount_ml` with `start <= timestamp < end`. Zero when nothing matches.
pub fn sum_in_window(conn: &Connection, start: i64, end: i64) -> AppResult<i64> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(amount_ml), 0) FROM intake_events
         WHERE timestamp >= ?1 AND timestamp < ?2",
        params![start, end],
        |row| row.get(0),
    )?;
    Ok(total)
}

pub fn count_events(conn: &Connection) -> AppResult<i64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM intake_events", [], |row| row.get(0))?;
    Ok(n)
}
