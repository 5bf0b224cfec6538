use std::path::PathBuf;

use serde_json::{json, Value};

use crate::error::{CheckpointError, CheckpointResult};
use crate::json::JsonCheckpointStore;
use crate::resume::{ResumeError, ResumePolicy};

const KEY: &str = "page";

/// Checkpoint adapter for paginated HTTP crawls.
///
/// Tracks the current page number so an interrupted crawl picks up at the
/// page it stopped on instead of page 1.
#[derive(Debug, Clone)]
pub struct HttpSaver {
    store: JsonCheckpointStore,
}

impl HttpSaver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonCheckpointStore::new(path),
        }
    }

    /// Save the current page number. Replaces the whole snapshot.
    pub fn save_page(&self, page: u64) -> CheckpointResult<()> {
        let mut snapshot = serde_json::Map::new();
        snapshot.insert(KEY.into(), json!(page));
        self.store.save(&snapshot)
    }

    /// The page to resume from, `1` when no checkpoint exists.
    pub fn load_page(&self) -> CheckpointResult<u64> {
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

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_page_defaults_to_one() {
        let dir = tempdir().unwrap();
        let saver = HttpSaver::new(dir.path().join("checkpoint.txt"));
        assert_eq!(saver.load_page().unwrap(), 1);
    }

    #[test]
    fn test_page_roundtrip() {
        let dir = tempdir().unwrap();
        let saver = HttpSaver::new(dir.path().join("checkpoint.txt"));

        saver.save_page(17).unwrap();
        assert_eq!(saver.load_page().unwrap(), 17);

        saver.clear().unwrap();
        assert_eq!(saver.load_page().unwrap(), 1);
    }
}
