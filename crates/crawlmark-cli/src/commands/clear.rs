use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use tracing::info;

use crawlmark_core::JsonCheckpointStore;
use crawlmark_sqlite::SqliteCheckpointStore;

use crate::config::Target;

pub fn cmd_clear(target: &Target, yes: bool) -> Result<()> {
    let what = match target {
        Target::File(path) => format!("checkpoint file {}", path.display()),
        Target::Db(path) => format!("checkpoint rows in {}", path.display()),
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {what}? The job will restart from the beginning"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    match target {
        Target::File(path) => {
            JsonCheckpointStore::new(path)
                .clear()
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Target::Db(path) => {
            let store = SqliteCheckpointStore::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            store.clear()?;
        }
    }

    info!("cleared {what}");
    println!("{} cleared {what}", "✓".green());
    Ok(())
}
