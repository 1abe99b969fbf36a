//! Profile store: the single `user_profile` row (id = 1).

use crate::core::live::{ChangeFeed, Live};
use crate::db::pool::SharedPool;
use crate::errors::AppResult;
use crate::models::profile::{ProfileState, UserProfile};
use rusqlite::{Connection, OptionalExtension, Row, params};

const PROFILE_ID: i64 = 1;

fn map_profile(row: &Row) -> rusqlite::Result<UserProfile> {
    Ok(UserProfile {
        gender: row.get("gender")?,
        age: row.get("age")?,
        weight_kg: row.get("weight_kg")?,
        height_cm: row.get("height_cm")?,
        sleep_time: row.get("sleep_time")?,
        wake_time: row.get("wake_time")?,
        daily_goal_ml: row.get("daily_goal_ml")?,
        cup_size_ml: row.get("cup_size_ml")?,
        notifications_enabled: row.get::<_, i32>("notifications_enabled")? == 1,
        notification_interval_minutes: row.get("notification_interval_minutes")?,
    })
}

/// Insert or fully replace the profile row.
pub fn upsert_profile(conn: &Connection, p: &UserProfile) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO user_profile (
            id, gender, age, weight_kg, height_cm, sleep_time, wake_time,
            daily_goal_ml, cup_size_ml, notifications_enabled, notification_interval_minutes
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            PROFILE_ID,
            p.gender,
            p.age,
            p.weight_kg,
            p.height_cm,
            p.sleep_time,
            p.wake_time,
            p.daily_goal_ml,
            p.cup_size_ml,
            if p.notifications_enabled { 1 } else { 0 },
            p.notification_interval_minutes,
        ],
    )?;
    Ok(())
}

pub fn load_profile(conn: &Connection) -> AppResult<Option<UserProfile>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM user_profile WHERE id = ?1")?;
    let profile = stmt.query_row([PROFILE_ID], map_profile).optional()?;
    Ok(profile)
}

#[derive(Clone)]
pub struct ProfileStore {
    pool: SharedPool,
    feed: ChangeFeed,
}

impl ProfileStore {
    pub fn new(pool: SharedPool) -> Self {
        let feed = pool.profile_feed().clone();
        Self { pool, feed }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Replace the singleton row entirely. Fields are never merged.
    pub fn upsert(&self, profile: &UserProfile) -> AppResult<()> {
        self.pool.with_conn(|conn| upsert_profile(conn, profile))?;
        self.feed.bump();
        Ok(())
    }

    pub fn read(&self) -> AppResult<ProfileState> {
        let p = self.pool.with_conn(|conn| load_profile(conn))?;
        Ok(ProfileState::from(p))
    }

    /// Live view: `Unset` before onboarding, then every stored version.
    pub fn watch(&self) -> AppResult<Live<ProfileState>> {
        let store = self.clone();
        Live::new(&self.feed, move || store.read())
    }
}
