use crate::cli::commands::{audit, open_ledger, sync_reminders};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::SyncOutcome;
use crate::errors::{AppError, AppResult};
use crate::models::profile::{ProfileState, UserProfile};
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, RESET};
use crate::utils::time::{format_interval, normalize_clock};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Profile {
        goal,
        cup,
        interval,
        notifications,
        sleep,
        wake,
        json,
    } = cmd
    {
        let (ledger, pool) = open_ledger(cfg)?;

        let mut changes: Vec<String> = Vec::new();

        if let Some(g) = goal {
            let p = ledger.set_daily_goal(*g)?;
            changes.push(format!("goal={}", p.daily_goal_ml));
        }
        if let Some(c) = cup {
            let p = ledger.set_cup_size(*c)?;
            changes.push(format!("cup={}", p.cup_size_ml));
        }
        if let Some(m) = interval {
            let p = ledger.set_notification_interval(*m)?;
            changes.push(format!("interval={}", p.notification_interval_minutes));
        }
        if let Some(t) = notifications {
            let p = ledger.set_notifications(t.enabled())?;
            changes.push(format!("notifications={}", p.notifications_enabled));
        }
        if sleep.is_some() || wake.is_some() {
            let mut p = ledger
                .profile()?
                .as_active()
                .cloned()
                .ok_or(AppError::ProfileNotSet)?;
            if let Some(s) = sleep {
                p.sleep_time = normalize_clock(s)?;
            }
            if let Some(w) = wake {
                p.wake_time = normalize_clock(w)?;
            }
            let p = ledger.update_profile(p)?;
            changes.push(format!("sleep={} wake={}", p.sleep_time, p.wake_time));
        }

        let state = ledger.profile()?;

        if !changes.is_empty() {
            let outcome = sync_reminders(&pool, &state)?;
            audit(&pool, "profile", "update", &changes.join(", "));
            success(format!("Profile updated: {}", changes.join(", ")));
            match outcome {
                SyncOutcome::Registered { period_minutes } => info(format!(
                    "Reminders every {}.",
                    format_interval(period_minutes as i32)
                )),
                SyncOutcome::Cancelled => info("Reminders are off."),
            }
        }

        if *json {
            let out = serde_json::to_string_pretty(&state)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        match &state {
            ProfileState::Active(p) => print_profile(p),
            ProfileState::Unset => info("No profile yet. Run `hydroledger onboard` to create one."),
        }
    }

    Ok(())
}

pub(crate) fn print_profile(p: &UserProfile) {
    println!("{}👤 Profile{}", CYAN, RESET);
    println!("  Gender        : {}", p.gender);
    println!("  Age           : {}", p.age);
    println!("  Weight        : {} kg", p.weight_kg);
    println!("  Height        : {} cm", p.height_cm);
    println!("  Wake / Sleep  : {} / {}", p.wake_time, p.sleep_time);
    println!("  Daily goal    : {} mL", p.daily_goal_ml);
    println!("  Cup size      : {} mL", p.cup_size_ml);
    println!(
        "  Reminders     : {}",
        if p.notifications_enabled {
            format!(
                "on, every {}",
                format_interval(p.notification_interval_minutes)
            )
        } else {
            "off".to_string()
        }
    );
}
