//! Change feeds and live views.
//!
//! Each store owns a [`ChangeFeed`]: a version counter bumped after every
//! committed write. A [`Live`] view caches one query result and re-runs the
//! query whenever the counter moves. Views over "today" also re-run once the
//! local calendar day changes.

use crate::errors::{AppError, AppResult};
use crate::utils::clock::{self, SharedClock};
use crate::utils::date;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Version counter shared by a store and its subscribers.
#[derive(Clone)]
pub struct ChangeFeed {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Publish a change. Works with or without subscribers.
    pub fn bump(&self) {
        self.tx.send_modify(|v| *v = v.wrapping_add(1));
    }

    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

type Query<T> = Arc<dyn Fn() -> AppResult<T> + Send + Sync>;

/// A query result kept current by one change feed.
pub struct Live<T> {
    rx: watch::Receiver<u64>,
    query: Query<T>,
    value: T,
    clock: SharedClock,
    /// Local day the value was computed for, when the query depends on it.
    day: Option<NaiveDate>,
}

impl<T> Live<T> {
    pub(crate) fn new<F>(feed: &ChangeFeed, query: F) -> AppResult<Self>
    where
        F: Fn() -> AppResult<T> + Send + Sync + 'static,
    {
        Self::build(feed, Arc::new(query), clock::system(), false)
    }

    /// Like [`Live::new`], but the value is also re-derived when the local
    /// calendar day of `clock` changes.
    pub(crate) fn daily<F>(feed: &ChangeFeed, clock: SharedClock, query: F) -> AppResult<Self>
    where
        F: Fn() -> AppResult<T> + Send + Sync + 'static,
    {
        Self::build(feed, Arc::new(query), clock, true)
    }

    fn build(
        feed: &ChangeFeed,
        query: Query<T>,
        clock: SharedClock,
        day_bound: bool,
    ) -> AppResult<Self> {
        let day = day_bound.then(|| clock.today());
        let mut rx = feed.subscribe();
        // Mark the current version as seen before the first read so that a
        // write racing with it still shows up as a change.
        rx.borrow_and_update();
        let value = query()?;
        Ok(Self {
            rx,
            query,
            value,
            clock,
            day,
        })
    }

    /// Last computed value.
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    fn day_rolled(&self) -> bool {
        self.day.is_some_and(|d| d != self.clock.today())
    }

    fn refresh(&mut self) -> AppResult<&T> {
        self.rx.borrow_and_update();
        if self.day.is_some() {
            self.day = Some(self.clock.today());
        }
        self.value = (self.query)()?;
        Ok(&self.value)
    }

    /// Non-blocking check. Returns the new value when the feed moved (or the
    /// day rolled over) since the last read, `None` otherwise.
    pub fn poll(&mut self) -> AppResult<Option<&T>> {
        let changed = self.rx.has_changed().unwrap_or(false) || self.day_rolled();
        if !changed {
            return Ok(None);
        }
        self.refresh().map(Some)
    }

    /// Wait for the next change and return the re-derived value.
    ///
    /// Day-bound views also wake up at the next local midnight. The timer is
    /// recomputed on every call from the current local time.
    pub async fn changed(&mut self) -> AppResult<&T> {
        if self.day_rolled() {
            return self.refresh();
        }

        if self.day.is_some() {
            let wait = date::until_next_midnight(self.clock.now());
            tokio::select! {
                res = self.rx.changed() => {
                    res.map_err(|_| AppError::Other("change feed closed".into()))?;
                }
                _ = tokio::time::sleep(wait) => {
                    debug!("local day boundary crossed, re-deriving live view");
                }
            }
        } else {
            self.rx
                .changed()
                .await
                .map_err(|_| AppError::Other("change feed closed".into()))?;
        }

        self.refresh()
    }
}
