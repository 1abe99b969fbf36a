use hydroledger::core::reminder::{
    DeliveryOptions, REMINDER_BODY, REMINDER_TASK_NAME, REMINDER_TITLE, ReminderHost,
    ReminderRequest, ReminderScheduler, SqliteReminderHost, SyncOutcome, run_delivery,
};
use hydroledger::db::initialize::init_db;
use hydroledger::db::pool::{DbPool, SharedPool};
use hydroledger::errors::AppResult;
use hydroledger::models::profile::ProfileState;
use std::collections::HashMap;
use std::time::Duration;

mod common;
use common::{memory_ledger, onboarding};

/// In-memory host that records every call it receives.
#[derive(Default)]
struct RecordingHost {
    tasks: HashMap<String, ReminderRequest>,
    registrations: usize,
    cancellations: usize,
}

impl ReminderHost for RecordingHost {
    fn register(&mut self, request: &ReminderRequest) -> AppResult<()> {
        self.registrations += 1;
        self.tasks
            .insert(request.task_name.clone(), request.clone());
        Ok(())
    }

    fn cancel(&mut self, task_name: &str) -> AppResult<()> {
        self.cancellations += 1;
        self.tasks.remove(task_name);
        Ok(())
    }

    fn current(&self, task_name: &str) -> AppResult<Option<ReminderRequest>> {
        Ok(self.tasks.get(task_name).cloned())
    }
}

fn memory_pool() -> SharedPool {
    let pool = DbPool::open_in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    pool.into_shared()
}

fn active_profile(interval: i32, enabled: bool) -> ProfileState {
    let ledger = memory_ledger();
    let mut p = ledger.onboard(onboarding(70)).unwrap();
    p.notification_interval_minutes = interval;
    p.notifications_enabled = enabled;
    ProfileState::Active(p)
}

#[test]
fn test_water_request_constants() {
    let req = ReminderRequest::water(30);
    assert_eq!(req.task_name, "WaterReminderWork");
    assert_eq!(req.title, "Time to Hydrate!");
    assert_eq!(req.body, "Stay healthy by drinking a glass of water now.");
    assert_eq!(req.period(), Duration::from_secs(30 * 60));

    assert_eq!(ReminderRequest::water(0).period_minutes, 1);
    assert_eq!(ReminderRequest::water(-10).period_minutes, 1);
}

#[test]
fn test_sync_is_idempotent() {
    let mut scheduler = ReminderScheduler::new(RecordingHost::default());
    let state = active_profile(30, true);

    for _ in 0..3 {
        assert_eq!(
            scheduler.sync(&state).unwrap(),
            SyncOutcome::Registered { period_minutes: 30 }
        );
    }

    let host = scheduler.host();
    assert_eq!(host.registrations, 3);
    assert_eq!(host.tasks.len(), 1, "one task no matter how often we sync");
    let task = host.current(REMINDER_TASK_NAME).unwrap().unwrap();
    assert_eq!(task.period_minutes, 30);
    assert_eq!(task.title, REMINDER_TITLE);
    assert_eq!(task.body, REMINDER_BODY);
}

#[test]
fn test_sync_replaces_period() {
    let mut scheduler = ReminderScheduler::new(RecordingHost::default());
    scheduler.sync(&active_profile(30, true)).unwrap();
    scheduler.sync(&active_profile(60, true)).unwrap();

    let host = scheduler.into_host();
    assert_eq!(host.tasks.len(), 1);
    assert_eq!(
        host.current(REMINDER_TASK_NAME).unwrap().unwrap().period_minutes,
        60
    );
}

#[test]
fn test_sync_cancels_when_disabled_or_unset() {
    let mut scheduler = ReminderScheduler::new(RecordingHost::default());
    scheduler.sync(&active_profile(30, true)).unwrap();

    assert_eq!(
        scheduler.sync(&active_profile(30, false)).unwrap(),
        SyncOutcome::Cancelled
    );
    assert!(scheduler.host().tasks.is_empty());

    // Cancelling twice and cancelling with no profile are both fine.
    assert_eq!(
        scheduler.sync(&ProfileState::Unset).unwrap(),
        SyncOutcome::Cancelled
    );
    assert!(scheduler.host().tasks.is_empty());
    assert_eq!(scheduler.host().cancellations, 2);
}

#[test]
fn test_sqlite_host_keeps_one_row() {
    let pool = memory_pool();
    let mut scheduler = ReminderScheduler::new(SqliteReminderHost::new(pool.clone()));

    scheduler.sync(&active_profile(20, true)).unwrap();
    scheduler.sync(&active_profile(45, true)).unwrap();

    let rows: i64 = pool
        .with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM reminder_schedule", [], |r| r.get(0))?)
        })
        .unwrap();
    assert_eq!(rows, 1);

    let host = SqliteReminderHost::new(pool.clone());
    assert_eq!(
        host.current(REMINDER_TASK_NAME).unwrap().unwrap().period_minutes,
        45
    );

    scheduler.sync(&active_profile(45, false)).unwrap();
    assert!(host.current(REMINDER_TASK_NAME).unwrap().is_none());
}

#[tokio::test]
async fn test_follow_tracks_profile_changes() {
    let ledger = memory_ledger();
    let live = ledger.watch_profile().unwrap();

    let pool = memory_pool();
    let mut sqlite_host = SqliteReminderHost::new(pool.clone());
    // Stale task: an unset profile must cancel it on the first sync.
    sqlite_host.register(&ReminderRequest::water(99)).unwrap();
    let mut scheduler = ReminderScheduler::new(sqlite_host.clone());

    let task = tokio::spawn(async move { scheduler.follow(live).await });

    let mut cleared = false;
    for _ in 0..100 {
        if sqlite_host.current(REMINDER_TASK_NAME).unwrap().is_none() {
            cleared = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(cleared, "initial sync with an unset profile cancels");

    ledger.onboard(onboarding(70)).unwrap();
    let mut registered = None;
    for _ in 0..100 {
        registered = sqlite_host.current(REMINDER_TASK_NAME).unwrap();
        if registered.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(registered.unwrap().period_minutes, 10);

    ledger.set_notifications(false).unwrap();
    let mut cancelled = false;
    for _ in 0..100 {
        if sqlite_host.current(REMINDER_TASK_NAME).unwrap().is_none() {
            cancelled = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(cancelled);

    task.abort();
}

#[tokio::test]
async fn test_delivery_posts_until_max_ticks() {
    let mut host = RecordingHost::default();
    host.register(&ReminderRequest::water(15)).unwrap();

    let opts = DeliveryOptions {
        max_ticks: Some(3),
        period_override: Some(Duration::ZERO),
    };
    let mut posted = Vec::new();
    let delivered = run_delivery(&host, &opts, |req| posted.push(req.title.clone()))
        .await
        .unwrap();

    assert_eq!(delivered, 3);
    assert_eq!(posted, vec![REMINDER_TITLE.to_string(); 3]);
}

#[tokio::test]
async fn test_delivery_stops_without_registration() {
    let host = RecordingHost::default();
    let opts = DeliveryOptions {
        max_ticks: Some(5),
        period_override: Some(Duration::ZERO),
    };
    let delivered = run_delivery(&host, &opts, |_| panic!("nothing to post"))
        .await
        .unwrap();
    assert_eq!(delivered, 0);
}
