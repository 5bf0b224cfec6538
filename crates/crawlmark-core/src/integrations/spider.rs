use std::path::PathBuf;

use serde_json::{json, Value};

use crate::error::{CheckpointError, CheckpointResult};
use crate::json::JsonCheckpointStore;
use crate::resume::{ResumeError, ResumePolicy};

const KEY: &str = "urls";

/// Checkpoint adapter for crawl frameworks that track a visited-URL set.
///
/// Persists the list of already-scraped URLs so a resumed spider skips work
/// it has done instead of re-fetching it.
#[derive(Debug, Clone)]
pub struct SpiderSaver {
    store: JsonCheckpointStore,
}

impl SpiderSaver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonCheckpointStore::new(path),
        }
    }

    /// Save the scraped-URL list. Replaces the whole snapshot.
    pub fn save_scraped_urls(&self, urls: &[String]) -> CheckpointResult<()> {
        let mut snapshot = serde_json::Map::new();
        snapshot.insert(KEY.into(), json!(urls));
        self.store.save(&snapshot)
    }

    /// Previously scraped URLs, empty when no checkpoint exists.
    pub fn load_scraped_urls(&self) -> CheckpointResult<Vec<String>> {
        Ok(self
            .store
            .load()?
            .and_then(|s| s.get(KEY).and_then(Value::as_array).cloned())
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default())
    }

    pub fn clear(&self) -> CheckpointResult<()> {
        self.store.clear()
    }

    pub fn confirm_resume(&self) -> Result<bool, ResumeError<CheckpointError>> {
        self.store.confirm_resume()
    }

    pub fn confirm_resume_with<P: ResumePolicy>(
        &self,
        policy: &mut P,
    ) -> Result<bool, ResumeError<CheckpointError>> {
        self.store.confirm_resume_with(policy)
    }

    pub fn store(&self) -> &JsonCheckpointStore {
        &self.store
    }
}
