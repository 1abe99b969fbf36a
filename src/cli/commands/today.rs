use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{CYAN, GREEN, RESET, YELLOW};
use crate::utils::date;
use crate::utils::time::format_volume;

const BAR_WIDTH: usize = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today { json } = cmd {
        let (ledger, _pool) = open_ledger(cfg)?;
        let progress = ledger.progress()?;

        if *json {
            let out = serde_json::to_string_pretty(&progress)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
            return Ok(());
        }

        let filled = (progress.ratio * BAR_WIDTH as f64).round() as usize;
        let bar = format!(
            "{}{}{}{}",
            GREEN,
            "█".repeat(filled),
            RESET,
            "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))
        );
        let color = if progress.ratio >= 1.0 { GREEN } else { YELLOW };

        println!("{}💧 {}{}", CYAN, date::today(), RESET);
        println!(
            "Today: {}{} / {}{} ({}%)",
            color,
            format_volume(progress.total_ml),
            format_volume(progress.goal_ml),
            RESET,
            progress.percent()
        );
        println!("[{}]", bar);

        if progress.remaining_ml() > 0 {
            println!("Remaining: {}", format_volume(progress.remaining_ml()));
        } else {
            println!("🎉 Daily goal reached!");
        }
    }

    Ok(())
}
