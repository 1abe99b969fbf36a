pub mod add;
pub mod clear;
pub mod config;
pub mod db;
pub mod del;
pub mod init;
pub mod list;
pub mod log;
pub mod onboard;
pub mod profile;
pub mod remind;
pub mod today;
pub mod weather;

use crate::config::Config;
use crate::core::ledger::Ledger;
use crate::core::reminder::{ReminderScheduler, SqliteReminderHost, SyncOutcome};
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::{DbPool, SharedPool};
use crate::errors::AppResult;
use crate::models::profile::ProfileState;
use crate::ui::messages::warning;
use std::future::Future;

/// Open the configured database and make sure the schema is current.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

/// Ledger plus the shared handle it was built on (for audit rows and the
/// reminder host).
pub(crate) fn open_ledger(cfg: &Config) -> AppResult<(Ledger, SharedPool)> {
    let shared = open_pool(cfg)?.into_shared();
    Ok((Ledger::new(shared.clone()), shared))
}

/// Write an audit row. Failures are reported but never fail the command.
pub(crate) fn audit(pool: &SharedPool, operation: &str, target: &str, message: &str) {
    let res = pool.with_conn(|conn| ttlog(conn, operation, target, message));
    if let Err(e) = res {
        warning(format!("Failed to write internal log: {}", e));
    }
}

/// Push the profile's notification settings to the reminder host.
pub(crate) fn sync_reminders(pool: &SharedPool, state: &ProfileState) -> AppResult<SyncOutcome> {
    let mut scheduler = ReminderScheduler::new(SqliteReminderHost::new(pool.clone()));
    scheduler.sync(state)
}

/// Run one async operation to completion on a private runtime.
pub(crate) fn block_on<F: Future>(fut: F) -> AppResult<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt.block_on(fut))
}
