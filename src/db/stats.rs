use crate::db::migrate;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::local_date_of;
use crate::utils::time::format_volume;
use chrono::NaiveDate;
use std::fs;

#[derive(Debug, Clone)]
pub struct DbInfo {
    pub file_size: u64,
    pub total_events: i64,
    pub total_ml: i64,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub has_profile: bool,
    pub pending_migrations: usize,
}

impl DbInfo {
    /// Average intake per calendar day between the first and the last event.
    pub fn average_ml_per_day(&self) -> Option<f64> {
        let (first, last) = (self.first_day?, self.last_day?);
        let days = (last - first).num_days() + 1;
        Some(self.total_ml as f64 / days.max(1) as f64)
    }
}

pub fn collect_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<DbInfo> {
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let (total_events, total_ml, first_ts, last_ts): (i64, i64, Option<i64>, Option<i64>) =
        pool.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(amount_ml), 0), MIN(timestamp), MAX(timestamp)
             FROM intake_events",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

    let has_profile: bool = pool.conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM user_profile WHERE id = 1)",
        [],
        |row| row.get(0),
    )?;

    Ok(DbInfo {
        file_size,
        total_events,
        total_ml,
        first_day: first_ts.map(local_date_of),
        last_day: last_ts.map(local_date_of),
        has_profile,
        pending_migrations: migrate::pending_count(&pool.conn)?,
    })
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    let info = collect_db_info(pool, db_path)?;
    println!();

    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!(
        "{}• Total events:{} {}{}{}",
        CYAN, RESET, GREEN, info.total_events, RESET
    );
    println!(
        "{}• Total volume:{} {}",
        CYAN,
        RESET,
        format_volume(info.total_ml)
    );

    let fmt_day = |d: Option<NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };
    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_day(info.first_day));
    println!("    to:   {}", fmt_day(info.last_day));

    if let Some(avg) = info.average_ml_per_day() {
        println!("{}• Average per day:{} {:.0} mL", CYAN, RESET, avg);
    }

    println!(
        "{}• Profile:{} {}",
        CYAN,
        RESET,
        if info.has_profile { "configured" } else { "not set" }
    );
    println!(
        "{}• Pending migrations:{} {}",
        CYAN, RESET, info.pending_migrations
    );

    println!();
    Ok(())
}
