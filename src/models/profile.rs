use serde::{Deserialize, Serialize};

/// Hard upper bound for the daily goal, applied on every write path.
pub const MAX_DAILY_GOAL_ML: i32 = 10_000;

/// Millilitres of water suggested per kilogram of body weight.
pub const GOAL_ML_PER_KG: i32 = 33;

/// Smallest reminder interval accepted by the interval editor.
pub const MIN_NOTIFICATION_INTERVAL_MINUTES: i32 = 15;

pub const DEFAULT_GOAL_ML: i32 = 2000;
pub const DEFAULT_CUP_SIZE_ML: i32 = 200;
pub const ONBOARDING_CUP_SIZE_ML: i32 = 250;
pub const ONBOARDING_INTERVAL_MINUTES: i32 = 10;

/// The single user configuration row (`user_profile.id = 1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: String,
    pub age: i32,
    pub weight_kg: i32,
    pub height_cm: i32,
    pub sleep_time: String, // HH:MM, local
    pub wake_time: String,  // HH:MM, local
    pub daily_goal_ml: i32,
    pub cup_size_ml: i32,
    pub notifications_enabled: bool,
    pub notification_interval_minutes: i32,
}

/// Onboarding gate: either nobody has completed onboarding yet, or there is
/// exactly one active profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "profile", rename_all = "lowercase")]
pub enum ProfileState {
    #[default]
    Unset,
    Active(UserProfile),
}

impl ProfileState {
    pub fn as_active(&self) -> Option<&UserProfile> {
        match self {
            ProfileState::Unset => None,
            ProfileState::Active(p) => Some(p),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, ProfileState::Unset)
    }
}

impl From<Option<UserProfile>> for ProfileState {
    fn from(value: Option<UserProfile>) -> Self {
        match value {
            Some(p) => ProfileState::Active(p),
            None => ProfileState::Unset,
        }
    }
}

/// Clamp a goal into `[0, MAX_DAILY_GOAL_ML]`.
pub fn clamp_goal(goal_ml: i32) -> i32 {
    goal_ml.clamp(0, MAX_DAILY_GOAL_ML)
}

/// Suggested goal for a body weight: `weight * 33`, capped at 10 L.
pub fn suggested_goal(weight_kg: i32) -> i32 {
    clamp_goal(weight_kg.saturating_mul(GOAL_ML_PER_KG))
}
