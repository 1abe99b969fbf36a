use crate::cli::commands::open_ledger;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::day_summary::DaySummary;
use crate::models::intake::IntakeEvent;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_volume;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { days, events, json } = cmd {
        let (ledger, _pool) = open_ledger(cfg)?;

        if *events {
            let all = ledger.all_logs()?;
            if *json {
                return print_json(&all);
            }
            print_events(&all);
            return Ok(());
        }

        let history = ledger.history(*days)?;
        if *json {
            return print_json(&history);
        }

        if history.is_empty() {
            println!("No drinks logged yet.");
            return Ok(());
        }

        for day in &history {
            print_day(day, &cfg.separator_char);
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

fn print_events(events: &[IntakeEvent]) {
    if events.is_empty() {
        println!("No drinks logged yet.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("WHEN", 17),
        Column::new("AMOUNT", 10),
    ]);
    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.date_time_str(),
            format!("{} mL", ev.amount_ml),
        ]);
    }
    print!("{}", table.render());
}

fn print_day(day: &DaySummary, sep: &str) {
    println!(
        "\n{}=== {} ({}) ==={} total {}",
        CYAN,
        day.label,
        day.date,
        RESET,
        format_volume(day.total_ml)
    );
    println!("{}{}{}", GREY, sep.repeat(32), RESET);
    for ev in &day.events {
        println!("  #{:<5} {}  {:>6} mL", ev.id, ev.time_str(), ev.amount_ml);
    }
}
