use std::path::PathBuf;

use serde_json::{json, Value};

use crate::error::{CheckpointError, CheckpointResult};
use crate::json::JsonCheckpointStore;
use crate::resume::{ResumeError, ResumePolicy};

const KEY: &str = "url";

/// Checkpoint adapter for browser-automation crawls.
///
/// Tracks the URL of the last visited page; the loaded URL feeds straight
/// into the automation library's navigation call on resume.
#[derive(Debug, Clone)]
pub struct BrowserSaver {
    store: JsonCheckpointStore,
}

impl BrowserSaver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonCheckpointStore::new(path),
        }
    }

    /// Save the current URL. Replaces the whole snapshot.
    pub fn save_url(&self, url: &str) -> CheckpointResult<()> {
        let mut snapshot = serde_json::Map::new();
        snapshot.insert(KEY.into(), json!(url));
        self.store.save(&snapshot)
    }

    /// The last saved URL, `None` when no checkpoint exists.
    pub fn load_url(&self) -> CheckpointResult<Option<String>> {
        Ok(self
            .store
            .load()?
            .and_then(|s| s.get(KEY).and_then(Value::as_str).map(String::from)))
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
