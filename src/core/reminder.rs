//! Reminder scheduler adapter.
//!
//! Translates the profile's notification settings into one recurring task
//! registered with a host scheduler. The adapter never learns whether a
//! reminder was delivered: registration is fire-and-forget.

use crate::core::live::Live;
use crate::db::pool::SharedPool;
use crate::db::reminders;
use crate::errors::AppResult;
use crate::models::profile::ProfileState;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Logical name of the single reminder task of an installation.
pub const REMINDER_TASK_NAME: &str = "WaterReminderWork";
pub const REMINDER_TITLE: &str = "Time to Hydrate!";
pub const REMINDER_BODY: &str = "Stay healthy by drinking a glass of water now.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub task_name: String,
    pub period_minutes: u32,
    pub title: String,
    pub body: String,
}

impl ReminderRequest {
    /// The water reminder with a given period. Periods below one minute are
    /// raised to one minute.
    pub fn water(period_minutes: i32) -> Self {
        Self {
            task_name: REMINDER_TASK_NAME.to_string(),
            period_minutes: period_minutes.max(1) as u32,
            title: REMINDER_TITLE.to_string(),
            body: REMINDER_BODY.to_string(),
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(u64::from(self.period_minutes) * 60)
    }
}

/// A platform scheduler able to run one named periodic task.
pub trait ReminderHost {
    /// Register `request`, replacing any task with the same name.
    fn register(&mut self, request: &ReminderRequest) -> AppResult<()>;

    /// Remove the task if present. Cancelling a missing task is not an error.
    fn cancel(&mut self, task_name: &str) -> AppResult<()>;

    fn current(&self, task_name: &str) -> AppResult<Option<ReminderRequest>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Registered { period_minutes: u32 },
    Cancelled,
}

pub struct ReminderScheduler<H> {
    host: H,
}

impl<H: ReminderHost> ReminderScheduler<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Bring the host in line with `state`. Safe to call on every profile
    /// observation, including redundant ones.
    #[instrument(skip(self, state))]
    pub fn sync(&mut self, state: &ProfileState) -> AppResult<SyncOutcome> {
        match state.as_active() {
            Some(p) if p.notifications_enabled => {
                let request = ReminderRequest::water(p.notification_interval_minutes);
                self.host.register(&request)?;
                debug!(period = request.period_minutes, "reminder registered");
                Ok(SyncOutcome::Registered {
                    period_minutes: request.period_minutes,
                })
            }
            _ => {
                self.host.cancel(REMINDER_TASK_NAME)?;
                debug!("reminder cancelled");
                Ok(SyncOutcome::Cancelled)
            }
        }
    }

    /// Follow a live profile view and sync on every observation. Sync
    /// failures are logged and skipped; the loop ends when the feed closes.
    pub async fn follow(&mut self, mut profile: Live<ProfileState>) -> AppResult<()> {
        if let Err(e) = self.sync(profile.get()) {
            warn!(error = %e, "reminder sync failed");
        }
        loop {
            let state = profile.changed().await?.clone();
            if let Err(e) = self.sync(&state) {
                warn!(error = %e, "reminder sync failed");
            }
        }
    }
}

/// Host backed by the `reminder_schedule` table. At most one row per task name.
#[derive(Clone)]
pub struct SqliteReminderHost {
    pool: SharedPool,
}

impl SqliteReminderHost {
    pub fn new(pool: SharedPool) -> Self {
        Self { pool }
    }
}

impl ReminderHost for SqliteReminderHost {
    fn register(&mut self, request: &ReminderRequest) -> AppResult<()> {
        self.pool.with_conn(|conn| {
            reminders::replace_schedule(
                conn,
                &request.task_name,
                i64::from(request.period_minutes),
                &request.title,
                &request.body,
            )
        })
    }

    fn cancel(&mut self, task_name: &str) -> AppResult<()> {
        self.pool
            .with_conn(|conn| reminders::delete_schedule(conn, task_name))?;
        Ok(())
    }

    fn current(&self, task_name: &str) -> AppResult<Option<ReminderRequest>> {
        let row = self
            .pool
            .with_conn(|conn| reminders::load_schedule(conn, task_name))?;
        Ok(row.map(|r| ReminderRequest {
            task_name: r.task_name,
            period_minutes: r.period_minutes.clamp(1, i64::from(u32::MAX)) as u32,
            title: r.title,
            body: r.body,
        }))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryOptions {
    /// Stop after this many posted reminders.
    pub max_ticks: Option<u64>,
    /// Replace the registered period (used for dry runs).
    pub period_override: Option<Duration>,
}

/// Host-side delivery loop: wait one period, re-read the registration and
/// post the reminder if it is still active. Stops when the task is cancelled,
/// after `max_ticks`, or on Ctrl-C. Returns how many reminders were posted.
pub async fn run_delivery<H, F>(host: &H, opts: &DeliveryOptions, mut post: F) -> AppResult<u64>
where
    H: ReminderHost,
    F: FnMut(&ReminderRequest),
{
    let mut delivered = 0u64;

    loop {
        if opts.max_ticks.is_some_and(|max| delivered >= max) {
            return Ok(delivered);
        }

        let Some(request) = host.current(REMINDER_TASK_NAME)? else {
            info!("no active reminder registration");
            return Ok(delivered);
        };

        let wait = opts.period_override.unwrap_or_else(|| request.period());
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = tokio::signal::ctrl_c() => {
                info!("delivery loop interrupted");
                return Ok(delivered);
            }
        }

        // Settings may have changed while sleeping.
        match host.current(REMINDER_TASK_NAME)? {
            Some(current) => {
                post(&current);
                delivered += 1;
            }
            None => return Ok(delivered),
        }
    }
}
