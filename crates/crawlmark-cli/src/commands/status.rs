use anyhow::{Context, Result};
use colored::Colorize;

use crawlmark_core::JsonCheckpointStore;
use crawlmark_sqlite::SqliteCheckpointStore;

use crate::config::Target;

pub fn cmd_status(target: &Target) -> Result<()> {
    match target {
        Target::File(path) => {
            let store = JsonCheckpointStore::new(path);
            let snapshot = store
                .load()
                .with_context(|| format!("Failed to load checkpoint from {}", path.display()))?;

            match snapshot {
                Some(snapshot) => {
                    println!("{} {}", "Checkpoint:".bold(), path.display());
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                }
                None => println!("No checkpoint at {}.", path.display()),
            }
        }
        Target::Db(path) => {
            let store = SqliteCheckpointStore::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            let last_id = store.load_last_id()?;

            println!("{} {}", "Checkpoint:".bold(), path.display());
            println!("last_processed_id = {last_id}");
        }
    }

    Ok(())
}
