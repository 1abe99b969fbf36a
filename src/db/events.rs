//! Event store: durable intake history plus its change feed.

use crate::core::live::{ChangeFeed, Live};
use crate::db::pool::SharedPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::intake::IntakeEvent;
use chrono::Utc;

#[derive(Clone)]
pub struct EventStore {
    pool: SharedPool,
    feed: ChangeFeed,
}

impl EventStore {
    pub fn new(pool: SharedPool) -> Self {
        let feed = pool.event_feed().clone();
        Self { pool, feed }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Record an event stamped with the current time.
    pub fn append(&self, amount_ml: i64) -> AppResult<IntakeEvent> {
        self.append_at(amount_ml, Utc::now().timestamp_millis())
    }

    pub fn append_at(&self, amount_ml: i64, timestamp: i64) -> AppResult<IntakeEvent> {
        let ev = self
            .pool
            .with_conn(|conn| queries::insert_event(conn, amount_ml, timestamp))?;
        self.feed.bump();
        Ok(ev)
    }

    /// Delete one event. A missing id is not an error; returns whether a row
    /// was actually removed.
    pub fn remove(&self, id: i64) -> AppResult<bool> {
        let n = self.pool.with_conn(|conn| queries::delete_event(conn, id))?;
        if n > 0 {
            self.feed.bump();
        }
        Ok(n > 0)
    }

    /// Delete every event. Returns how many rows were removed.
    pub fn clear(&self) -> AppResult<usize> {
        let n = self.pool.with_conn(|conn| queries::delete_all_events(conn))?;
        self.feed.bump();
        Ok(n)
    }

    /// Every event, newest first.
    pub fn list_all(&self) -> AppResult<Vec<IntakeEvent>> {
        self.pool.with_conn(|conn| queries::load_all_events(conn))
    }

    pub fn list_in_window(&self, start: i64, end: i64) -> AppResult<Vec<IntakeEvent>> {
        self.pool
            .with_conn(|conn| queries::load_events_in_window(conn, start, end))
    }

    /// Sum over `[start, end)`. Always a number, 0 for an empty window.
    pub fn sum_in_window(&self, start: i64, end: i64) -> AppResult<i64> {
        self.pool
            .with_conn(|conn| queries::sum_in_window(conn, start, end))
    }

    pub fn count(&self) -> AppResult<i64> {
        self.pool.with_conn(|conn| queries::count_events(conn))
    }

    /// Live view of [`EventStore::list_all`].
    pub fn watch_all(&self) -> AppResult<Live<Vec<IntakeEvent>>> {
        let store = self.clone();
        Live::new(&self.feed, move || store.list_all())
    }
}
