#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, TimeDelta};
use hydroledger::core::ledger::{Ledger, OnboardingInput};
use hydroledger::db::initialize::init_db as apply_schema;
use hydroledger::db::pool::DbPool;
use hydroledger::utils::clock::{Clock, SharedClock};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Private config directory so tests never touch the real ~/.hydroledger
pub fn test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("hydroledger_home_{}", name));
    fs::create_dir_all(&path).ok();
    path
}

pub fn hl() -> Command {
    hl_with_home(&test_home("shared"))
}

pub fn hl_with_home(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("hydroledger");
    cmd.env("HYDROLEDGER_HOME", home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hydroledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize a DB through the CLI
pub fn init_db(db_path: &str) {
    hl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Fresh in-memory ledger with the schema applied
pub fn memory_ledger() -> Ledger {
    Ledger::open(DbPool::open_in_memory().expect("open in-memory db")).expect("init ledger")
}

/// In-memory ledger whose "now" comes from `clock`
pub fn memory_ledger_with_clock(clock: SharedClock) -> Ledger {
    let pool = DbPool::open_in_memory().expect("open in-memory db");
    apply_schema(&pool.conn).expect("init schema");
    Ledger::with_clock(pool.into_shared(), clock)
}

/// Clock that only moves when told to
pub struct ManualClock(Mutex<DateTime<Local>>);

impl ManualClock {
    pub fn new(now: DateTime<Local>) -> Arc<Self> {
        Arc::new(Self(Mutex::new(now)))
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.0.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.0.lock().unwrap()
    }
}

/// Clock driven by tokio's (pausable) timer, starting at `base`
pub struct TokioClock {
    base: DateTime<Local>,
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn starting_at(base: DateTime<Local>) -> Arc<Self> {
        Arc::new(Self {
            base,
            origin: tokio::time::Instant::now(),
        })
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Local> {
        self.base + TimeDelta::from_std(self.origin.elapsed()).unwrap()
    }
}

pub fn onboarding(weight_kg: i32) -> OnboardingInput {
    OnboardingInput {
        gender: "Female".to_string(),
        age: 31,
        weight_kg,
        height_cm: 168,
        sleep_time: "23:00".to_string(),
        wake_time: "07:00".to_string(),
        daily_goal_ml: None,
        cup_size_ml: None,
    }
}
