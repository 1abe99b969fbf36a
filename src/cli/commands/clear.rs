use crate::cli::commands::{audit, open_ledger};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    if let Commands::Clear { yes } = cmd {
        if !*yes
            && !is_test
            && !ask_confirmation("Delete the WHOLE intake history? This action is irreversible.")
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let (ledger, pool) = open_ledger(cfg)?;
        let n = ledger.clear_history()?;

        audit(&pool, "clear", "", &format!("Deleted {} intake events", n));
        success(format!("History cleared ({} events deleted).", n));
    }

    Ok(())
}
