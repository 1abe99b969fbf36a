//! Wall-clock source for everything that asks "what time is it" or "which
//! day is today".

use chrono::{DateTime, Local, NaiveDate};
use std::sync::Arc;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Local calendar day of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

pub type SharedClock = Arc<dyn Clock>;

/// The process clock.
pub fn system() -> SharedClock {
    Arc::new(SystemClock)
}
