//! SQLite connection handle shared by the stores.
//!
//! A single `Connection` serves the whole process. It lives behind a mutex so
//! the event store, the profile store and the reminder host all serialize their
//! writes through one place. The handle also owns the change feeds, so every
//! store built on it publishes to the same subscribers.

use crate::core::live::ChangeFeed;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Helper to execute a closure with a mutable connection reference.
    pub fn with_conn<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        func(&mut self.conn)
    }

    /// Move the pool behind a shared handle.
    pub fn into_shared(self) -> SharedPool {
        SharedPool {
            db: Arc::new(Mutex::new(self)),
            events: ChangeFeed::new(),
            profile: ChangeFeed::new(),
        }
    }
}

/// Cloneable storage handle, constructed once at startup and injected
/// wherever the stores need it. Clones share the connection and the feeds.
#[derive(Clone)]
pub struct SharedPool {
    db: Arc<Mutex<DbPool>>,
    events: ChangeFeed,
    profile: ChangeFeed,
}

impl SharedPool {
    pub fn lock(&self) -> AppResult<MutexGuard<'_, DbPool>> {
        self.db.lock().map_err(|_| AppError::StorageLock)
    }

    /// Bumped after every committed write to `intake_events`.
    pub fn event_feed(&self) -> &ChangeFeed {
        &self.events
    }

    /// Bumped after every committed write to `user_profile`.
    pub fn profile_feed(&self) -> &ChangeFeed {
        &self.profile
    }

    /// Run `func` while holding the connection lock.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut pool = self.lock()?;
        pool.with_conn(func)
    }
}
