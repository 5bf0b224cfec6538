use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use crawlmark_core::JsonCheckpointStore;
use crawlmark_sqlite::SqliteCheckpointStore;

use crate::config::Target;

/// Write checkpoint fields by hand, e.g. to rewind a job before rerunning it.
///
/// File fields merge into the existing snapshot rather than replacing it,
/// so `set --page` keeps a previously set url.
pub fn cmd_set(
    target: &Target,
    page: Option<u64>,
    url: Option<String>,
    last_id: Option<i64>,
) -> Result<()> {
    match target {
        Target::File(path) => {
            if last_id.is_some() {
                anyhow::bail!("--last-id applies to the --db backend");
            }
            if page.is_none() && url.is_none() {
                anyhow::bail!("nothing to set; pass --page and/or --url");
            }

            let store = JsonCheckpointStore::new(path);
            store
                .update(|snapshot| {
                    if let Some(page) = page {
                        snapshot.insert("page".into(), json!(page));
                    }
                    if let Some(url) = &url {
                        snapshot.insert("url".into(), json!(url));
                    }
                })
                .with_context(|| format!("Failed to update {}", path.display()))?;

            println!("{} updated {}", "✓".green(), path.display());
        }
        Target::Db(path) => {
            if page.is_some() || url.is_some() {
                anyhow::bail!("--page/--url apply to the --file backend");
            }
            let Some(last_id) = last_id else {
                anyhow::bail!("nothing to set; pass --last-id");
            };

            let store = SqliteCheckpointStore::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            store.save_last_id(last_id)?;

            println!("{} last_processed_id = {last_id}", "✓".green());
        }
    }

    Ok(())
}
