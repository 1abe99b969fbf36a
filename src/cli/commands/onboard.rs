use crate::cli::commands::profile::print_profile;
use crate::cli::commands::{audit, open_ledger, sync_reminders};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::OnboardingInput;
use crate::errors::AppResult;
use crate::models::profile::ProfileState;
use crate::ui::messages::{success, warning};
use crate::utils::time::normalize_clock;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Onboard {
        gender,
        age,
        weight,
        height,
        sleep,
        wake,
        goal,
        cup,
    } = cmd
    {
        let input = OnboardingInput {
            gender: gender.clone(),
            age: *age,
            weight_kg: *weight,
            height_cm: *height,
            sleep_time: normalize_clock(sleep)?,
            wake_time: normalize_clock(wake)?,
            daily_goal_ml: *goal,
            cup_size_ml: *cup,
        };

        let (ledger, pool) = open_ledger(cfg)?;

        if let ProfileState::Active(_) = ledger.profile()? {
            warning("A profile already exists: it will be replaced.");
        }

        let profile = ledger.onboard(input)?;
        let state = ProfileState::Active(profile.clone());
        sync_reminders(&pool, &state)?;

        audit(
            &pool,
            "onboard",
            "profile",
            &format!("Profile created, goal {} mL", profile.daily_goal_ml),
        );

        success("Profile saved. Welcome aboard!");
        print_profile(&profile);
    }

    Ok(())
}
