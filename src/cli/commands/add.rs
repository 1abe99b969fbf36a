use crate::cli::commands::{audit, open_ledger};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::date::parse_local_datetime_ms;
use crate::utils::time::format_volume;

/// Log one drink.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { amount, at } = cmd {
        //
        // 1. Parse the optional timestamp
        //
        let at_ms = match at {
            Some(s) => Some(parse_local_datetime_ms(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?),
            None => None,
        };

        let (ledger, pool) = open_ledger(cfg)?;

        //
        // 2. Amount: explicit, or one cup of the configured size
        //
        let amount_ml = match amount {
            Some(a) => *a,
            None => i64::from(ledger.effective_cup_size()?),
        };

        //
        // 3. Record
        //
        let ev = match at_ms {
            Some(ts) => ledger.log_intake_at(amount_ml, ts)?,
            None => ledger.log_intake(amount_ml)?,
        };

        audit(
            &pool,
            "add",
            &format!("id={}", ev.id),
            &format!("Logged {} mL at {}", ev.amount_ml, ev.date_time_str()),
        );

        let progress = ledger.progress()?;
        success(format!(
            "Logged {} (id {}) at {}. Today: {} / {} ({}%)",
            format_volume(ev.amount_ml),
            ev.id,
            ev.date_time_str(),
            format_volume(progress.total_ml),
            format_volume(progress.goal_ml),
            progress.percent()
        ));
    }

    Ok(())
}
