//! Versioned schema migrations.
//!
//! Every migration is identified by a version string and recorded in the
//! `log` table as a `migration_applied` row once it succeeds. Applying the
//! list again is a no-op, and existing rows are never dropped.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};
use tracing::info;

struct Migration {
    version: &'static str,
    message: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20260112_0001_create_intake_events",
        message: "Created intake_events table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS intake_events (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            amount_ml  INTEGER NOT NULL CHECK(amount_ml > 0),
            timestamp  INTEGER NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260112_0002_create_user_profile",
        message: "Created user_profile table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS user_profile (
            id                            INTEGER PRIMARY KEY CHECK(id = 1),
            gender                        TEXT NOT NULL,
            age                           INTEGER NOT NULL,
            weight_kg                     INTEGER NOT NULL,
            height_cm                     INTEGER NOT NULL,
            sleep_time                    TEXT NOT NULL,
            wake_time                     TEXT NOT NULL,
            daily_goal_ml                 INTEGER NOT NULL,
            cup_size_ml                   INTEGER NOT NULL,
            notifications_enabled         INTEGER NOT NULL DEFAULT 1,
            notification_interval_minutes INTEGER NOT NULL DEFAULT 10
        );
        "#,
    },
    Migration {
        version: "20260305_0003_create_reminder_schedule",
        message: "Created reminder_schedule table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS reminder_schedule (
            task_name      TEXT PRIMARY KEY,
            period_minutes INTEGER NOT NULL CHECK(period_minutes > 0),
            title          TEXT NOT NULL,
            body           TEXT NOT NULL,
            registered_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20260305_0004_index_intake_timestamp",
        message: "Added timestamp index on intake_events",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_intake_events_timestamp ON intake_events(timestamp);
        "#,
    },
];

/// Ensure that the `log` table exists. Migration bookkeeping lives there.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    if is_applied(conn, m.version)? {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.message],
    )?;
    tx.commit()?;

    info!(version = m.version, "{}", m.message);
    Ok(())
}

/// Public entry point: run all pending migrations, in order.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        apply(conn, m)?;
    }

    Ok(())
}

/// Versions already recorded in the `log` table.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    ensure_log_table(conn)?;

    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of migrations known to this build that are not yet applied.
pub fn pending_count(conn: &Connection) -> AppResult<usize> {
    let applied = applied_versions(conn)?;
    Ok(MIGRATIONS
        .iter()
        .filter(|m| !applied.iter().any(|v| v == m.version))
        .count())
}
