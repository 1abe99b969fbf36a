//! Ledger service: the domain façade over the event and profile stores.
//!
//! Every validation and clamp lives here, on the write paths, so callers
//! never have to repeat them.

use crate::core::history;
use crate::core::live::Live;
use crate::db::events::EventStore;
use crate::db::initialize::init_db;
use crate::db::pool::{DbPool, SharedPool};
use crate::db::profile::ProfileStore;
use crate::errors::{AppError, AppResult};
use crate::models::day_summary::{DaySummary, Progress};
use crate::models::intake::{IntakeEvent, MAX_INTAKE_ML};
use crate::models::profile::{
    DEFAULT_CUP_SIZE_ML, DEFAULT_GOAL_ML, MIN_NOTIFICATION_INTERVAL_MINUTES,
    ONBOARDING_CUP_SIZE_ML, ONBOARDING_INTERVAL_MINUTES, ProfileState, UserProfile, clamp_goal,
    suggested_goal,
};
use crate::utils::clock::{self, SharedClock};
use crate::utils::date;
use chrono::NaiveDate;
use tracing::debug;

/// Answers collected by the onboarding flow.
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    pub gender: String,
    pub age: i32,
    pub weight_kg: i32,
    pub height_cm: i32,
    pub sleep_time: String,
    pub wake_time: String,
    /// Explicit goal from the interactive goal step. `None` derives it from weight.
    pub daily_goal_ml: Option<i32>,
    /// Defaults to 250 mL.
    pub cup_size_ml: Option<i32>,
}

#[derive(Clone)]
pub struct Ledger {
    events: EventStore,
    profile: ProfileStore,
    clock: SharedClock,
}

impl Ledger {
    /// Build a ledger over an already initialized storage handle.
    pub fn new(pool: SharedPool) -> Self {
        Self::with_clock(pool, clock::system())
    }

    /// Like [`Ledger::new`], with "now" and "today" taken from `clock`.
    pub fn with_clock(pool: SharedPool, clock: SharedClock) -> Self {
        Self {
            events: EventStore::new(pool.clone()),
            profile: ProfileStore::new(pool),
            clock,
        }
    }

    /// Run pending migrations on `pool`, then build the ledger over it.
    pub fn open(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self::new(pool.into_shared()))
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profile
    }

    // ------------------------------------------------
    // Intake events
    // ------------------------------------------------

    pub fn log_intake(&self, amount_ml: i64) -> AppResult<IntakeEvent> {
        validate_amount(amount_ml)?;
        let ev = self
            .events
            .append_at(amount_ml, self.clock.now().timestamp_millis())?;
        debug!(id = ev.id, amount_ml, "intake logged");
        Ok(ev)
    }

    /// Same as [`Ledger::log_intake`] with an explicit timestamp (epoch ms).
    pub fn log_intake_at(&self, amount_ml: i64, timestamp: i64) -> AppResult<IntakeEvent> {
        validate_amount(amount_ml)?;
        let ev = self.events.append_at(amount_ml, timestamp)?;
        debug!(id = ev.id, amount_ml, timestamp, "intake logged");
        Ok(ev)
    }

    /// Log one cup of the configured size.
    pub fn log_cup(&self) -> AppResult<IntakeEvent> {
        let cup = self.effective_cup_size()?;
        self.log_intake(i64::from(cup))
    }

    /// Returns whether something was deleted. Unknown ids are not an error.
    pub fn delete_intake(&self, id: i64) -> AppResult<bool> {
        self.events.remove(id)
    }

    pub fn clear_history(&self) -> AppResult<usize> {
        self.events.clear()
    }

    pub fn all_logs(&self) -> AppResult<Vec<IntakeEvent>> {
        self.events.list_all()
    }

    pub fn watch_all_logs(&self) -> AppResult<Live<Vec<IntakeEvent>>> {
        self.events.watch_all()
    }

    // ------------------------------------------------
    // Aggregates
    // ------------------------------------------------

    /// Total since local midnight. The window start is recomputed on every call.
    pub fn today_total(&self) -> AppResult<i64> {
        self.events
            .sum_in_window(date::start_of_day_ms(self.clock.today()), i64::MAX)
    }

    /// Live [`Ledger::today_total`]: re-derived on every event change and when
    /// the local day rolls over.
    pub fn watch_today_total(&self) -> AppResult<Live<i64>> {
        let events = self.events.clone();
        let clock = self.clock.clone();
        Live::daily(self.events.feed(), self.clock.clone(), move || {
            events.sum_in_window(date::start_of_day_ms(clock.today()), i64::MAX)
        })
    }

    pub fn total_for_day(&self, day: NaiveDate) -> AppResult<i64> {
        let (start, end) = date::day_window_ms(day);
        self.events.sum_in_window(start, end)
    }

    pub fn progress(&self) -> AppResult<Progress> {
        let total = self.today_total()?;
        let goal = self.effective_goal()?;
        Ok(Progress::new(total, goal as i64))
    }

    /// History grouped by local day, newest first.
    pub fn history(&self, max_days: Option<usize>) -> AppResult<Vec<DaySummary>> {
        let events = self.events.list_all()?;
        Ok(history::group_by_day(&events, self.clock.today(), max_days))
    }

    // ------------------------------------------------
    // Profile
    // ------------------------------------------------

    pub fn profile(&self) -> AppResult<ProfileState> {
        self.profile.read()
    }

    pub fn watch_profile(&self) -> AppResult<Live<ProfileState>> {
        self.profile.watch()
    }

    /// Create the profile. The goal defaults to `min(weight * 33, 10000)`.
    pub fn onboard(&self, input: OnboardingInput) -> AppResult<UserProfile> {
        if let Some(cup) = input.cup_size_ml {
            validate_amount(i64::from(cup))?;
        }

        let daily_goal_ml = match input.daily_goal_ml {
            Some(goal) => clamp_goal(goal),
            None => suggested_goal(input.weight_kg),
        };

        let profile = UserProfile {
            gender: input.gender,
            age: input.age,
            weight_kg: input.weight_kg,
            height_cm: input.height_cm,
            sleep_time: input.sleep_time,
            wake_time: input.wake_time,
            daily_goal_ml,
            cup_size_ml: input.cup_size_ml.unwrap_or(ONBOARDING_CUP_SIZE_ML),
            notifications_enabled: true,
            notification_interval_minutes: ONBOARDING_INTERVAL_MINUTES,
        };

        self.profile.upsert(&profile)?;
        debug!(goal = profile.daily_goal_ml, "profile onboarded");
        Ok(profile)
    }

    /// Persist a full snapshot. Only the goal is clamped; other fields pass
    /// through as given.
    pub fn update_profile(&self, profile: UserProfile) -> AppResult<UserProfile> {
        if self.profile.read()?.is_unset() {
            return Err(AppError::ProfileNotSet);
        }

        let profile = UserProfile {
            daily_goal_ml: clamp_goal(profile.daily_goal_ml),
            ..profile
        };
        self.profile.upsert(&profile)?;
        Ok(profile)
    }

    fn edit_profile<F>(&self, edit: F) -> AppResult<UserProfile>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = match self.profile.read()? {
            ProfileState::Active(p) => p,
            ProfileState::Unset => return Err(AppError::ProfileNotSet),
        };
        edit(&mut profile);
        self.update_profile(profile)
    }

    pub fn set_daily_goal(&self, goal_ml: i32) -> AppResult<UserProfile> {
        self.edit_profile(|p| p.daily_goal_ml = goal_ml)
    }

    pub fn set_cup_size(&self, cup_size_ml: i32) -> AppResult<UserProfile> {
        validate_amount(i64::from(cup_size_ml))?;
        self.edit_profile(|p| p.cup_size_ml = cup_size_ml)
    }

    pub fn set_notifications(&self, enabled: bool) -> AppResult<UserProfile> {
        self.edit_profile(|p| p.notifications_enabled = enabled)
    }

    /// Reminder interval, floored at 15 minutes.
    pub fn set_notification_interval(&self, minutes: i32) -> AppResult<UserProfile> {
        let minutes = minutes.max(MIN_NOTIFICATION_INTERVAL_MINUTES);
        self.edit_profile(|p| p.notification_interval_minutes = minutes)
    }

    pub fn effective_goal(&self) -> AppResult<i32> {
        Ok(match self.profile.read()? {
            ProfileState::Active(p) => p.daily_goal_ml,
            ProfileState::Unset => DEFAULT_GOAL_ML,
        })
    }

    pub fn effective_cup_size(&self) -> AppResult<i32> {
        Ok(match self.profile.read()? {
            ProfileState::Active(p) => p.cup_size_ml,
            ProfileState::Unset => DEFAULT_CUP_SIZE_ML,
        })
    }
}

/// Amounts must be in `1..=MAX_INTAKE_ML`.
fn validate_amount(amount_ml: i64) -> AppResult<()> {
    if amount_ml <= 0 || amount_ml > MAX_INTAKE_ML {
        return Err(AppError::InvalidAmount(amount_ml));
    }
    Ok(())
}
