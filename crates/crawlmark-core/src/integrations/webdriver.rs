use std::path::PathBuf;

use serde_json::{json, Value};

use crate::error::{CheckpointError, CheckpointResult};
use crate::json::JsonCheckpointStore;
use crate::resume::{ResumeError, ResumePolicy};

// Same key as the HTTP adapter; both checkpoint a page number.
const KEY: &str = "page";

/// Checkpoint adapter for WebDriver-based crawls.
///
/// Tracks the last successfully processed page of paginated content driven
/// through a browser driver.
#[derive(Debug, Clone)]
pub struct WebDriverSaver {
    store: JsonCheckpointStore,
}

impl WebDriverSaver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonCheckpointStore::new(path),
        }
    }

    /// Save the last processed page number. Replaces the whole snapshot.
    pub fn save_last_page(&self, page: u64) -> CheckpointResult<()> {
        let mut snapshot = serde_json::Map::new();
        snapshot.insert(KEY.into(), json!(page));
        self.store.save(&snapshot)
    }

    /// The page to resume from, `1` when no checkpoint exists.
    pub fn load_last_page(&self) -> CheckpointResult<u64> {
        Ok(self
            .store
            .load()?
            .and_then(|s| s.get(KEY).and_then(Value::as_u64))
            .unwrap_or(1))
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
