use crate::cli::commands::{audit, open_ledger};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let (ledger, pool) = open_ledger(cfg)?;

        if ledger.delete_intake(*id)? {
            audit(&pool, "del", &format!("id={}", id), "Deleted intake event");
            success(format!("Event #{} has been deleted.", id));
        } else {
            info(format!("No event with id {}. Nothing deleted.", id));
        }
    }

    Ok(())
}
