use crate::cli::commands::{audit, block_on, open_ledger, sync_reminders};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::{
    DeliveryOptions, REMINDER_TASK_NAME, ReminderHost, SqliteReminderHost, SyncOutcome,
    run_delivery,
};
use crate::errors::AppResult;
use crate::ui::messages::{info, notify, success};
use crate::utils::time::format_interval;
use std::time::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Remind {
        status,
        sync,
        run,
        ticks,
        every_secs,
    } = cmd
    {
        let (ledger, pool) = open_ledger(cfg)?;
        let host = SqliteReminderHost::new(pool.clone());

        //
        // 1) SYNC
        //
        if *sync {
            let outcome = sync_reminders(&pool, &ledger.profile()?)?;
            let msg = match outcome {
                SyncOutcome::Registered { period_minutes } => {
                    format!("Reminder registered every {}", format_interval(period_minutes as i32))
                }
                SyncOutcome::Cancelled => "Reminder cancelled".to_string(),
            };
            audit(&pool, "remind", "sync", &msg);
            success(msg);
        }

        //
        // 2) STATUS (default when nothing else is requested)
        //
        if *status || (!*sync && !*run) {
            match host.current(REMINDER_TASK_NAME)? {
                Some(req) => info(format!(
                    "Reminder '{}' active: every {}",
                    req.task_name,
                    format_interval(req.period_minutes as i32)
                )),
                None => info("No reminder scheduled."),
            }
        }

        //
        // 3) RUN
        //
        if *run {
            let opts = DeliveryOptions {
                max_ticks: *ticks,
                period_override: every_secs.map(Duration::from_secs),
            };
            let delivered = block_on(run_delivery(&host, &opts, |req| {
                notify(&req.title, &req.body);
            }))??;
            info(format!("{} reminder(s) delivered.", delivered));
        }
    }

    Ok(())
}
