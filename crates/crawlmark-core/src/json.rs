use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{CheckpointError, CheckpointResult};
use crate::resume::{confirm_resume, InteractivePrompt, ResumeError, ResumePolicy, ResumeProgress};
use crate::store::CheckpointStore;

/// A checkpoint snapshot: string keys mapped to JSON values.
pub type Snapshot = Map<String, Value>;

/// Conventional file name used by CLI defaults. The store itself always
/// takes an explicit path.
pub const DEFAULT_FILE: &str = "checkpoint.txt";

/// Whole-snapshot checkpoint persistence in a single JSON file.
///
/// Every save replaces the file's entire contents; there is no merge and
/// no history. The file holds exactly one JSON object at top level.
#[derive(Debug, Clone)]
pub struct JsonCheckpointStore {
    path: PathBuf,
}

impl JsonCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `snapshot` and overwrite the checkpoint file.
    pub fn save(&self, snapshot: &Snapshot) -> CheckpointResult<()> {
        let body = serde_json::to_string(snapshot).map_err(CheckpointError::Serialization)?;
        fs::write(&self.path, body)?;
        info!(path = %self.path.display(), keys = snapshot.len(), "saved checkpoint");
        Ok(())
    }

    /// Read the current snapshot. `None` when the file does not exist.
    ///
    /// An existing file that is empty or not valid JSON is reported as
    /// [`CheckpointError::Corrupt`], never as an absent snapshot.
    pub fn load(&self) -> CheckpointResult<Option<Snapshot>> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = serde_json::from_str(&body).map_err(|source| CheckpointError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "loaded checkpoint");
        Ok(Some(snapshot))
    }

    /// Remove the checkpoint file. Missing file is a no-op.
    pub fn clear(&self) -> CheckpointResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "cleared checkpoint");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read-merge-write: load the existing snapshot (empty when absent),
    /// apply `f`, and save the result.
    ///
    /// The composable alternative to the integration accessors, which
    /// replace the whole snapshot with a single key.
    pub fn update(&self, f: impl FnOnce(&mut Snapshot)) -> CheckpointResult<()> {
        let mut snapshot = self.load()?.unwrap_or_default();
        f(&mut snapshot);
        self.save(&snapshot)
    }

    /// Block on stdin/stdout for a resume decision, reporting progress
    /// figures from the current snapshot when present.
    pub fn confirm_resume(&self) -> Result<bool, ResumeError<CheckpointError>> {
        self.confirm_resume_with(&mut InteractivePrompt::stdio())
    }

    /// Resume decision through an injected policy.
    pub fn confirm_resume_with<P: ResumePolicy>(
        &self,
        policy: &mut P,
    ) -> Result<bool, ResumeError<CheckpointError>> {
        confirm_resume(self, policy)
    }
}

impl CheckpointStore for JsonCheckpointStore {
    type Snapshot = Snapshot;
    type Error = CheckpointError;

    fn save(&self, snapshot: &Snapshot) -> CheckpointResult<()> {
        JsonCheckpointStore::save(self, snapshot)
    }

    fn load(&self) -> CheckpointResult<Option<Snapshot>> {
        JsonCheckpointStore::load(self)
    }

    fn clear(&self) -> CheckpointResult<()> {
        JsonCheckpointStore::clear(self)
    }

    fn progress(&self) -> CheckpointResult<Option<ResumeProgress>> {
        let Some(snapshot) = self.load()? else {
            return Ok(None);
        };

        Ok(Some(ResumeProgress {
            scraped: snapshot.get("scraped").and_then(Value::as_u64).unwrap_or(0),
            total: snapshot.get("total").and_then(Value::as_u64),
        }))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;
    use crate::resume::AlwaysResume;

    fn snapshot_of(value: Value) -> Snapshot {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_roundtrip_nested_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.txt"));

        let snapshot = snapshot_of(json!({
            "page": 12,
            "url": "https://example.com/page/12",
            "done": false,
            "note": null,
            "seen": ["a", "b"],
            "session": {"cookie": "abc", "retries": 0},
        }));

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_save_overwrites_whole_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.txt"));

        store.save(&snapshot_of(json!({"url": "a", "page": 3}))).unwrap();
        store.save(&snapshot_of(json!({"page": 1}))).unwrap();

        assert_eq!(store.load().unwrap(), Some(snapshot_of(json!({"page": 1}))));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("never-saved.txt"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_empty_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.txt");
        std::fs::write(&path, "").unwrap();

        let store = JsonCheckpointStore::new(&path);
        assert!(matches!(
            store.load().unwrap_err(),
            CheckpointError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_garbage_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.txt");
        std::fs::write(&path, "not json at all {{{").unwrap();

        let store = JsonCheckpointStore::new(&path);
        assert!(matches!(
            store.load().unwrap_err(),
            CheckpointError::Corrupt { .. }
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.txt");
        let store = JsonCheckpointStore::new(&path);

        store.save(&snapshot_of(json!({"page": 5}))).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.load().unwrap(), None);

        // A second clear succeeds with nothing to remove.
        store.clear().unwrap();
    }

    #[test]
    fn test_update_merges_into_existing_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.txt"));

        store.save(&snapshot_of(json!({"url": "a"}))).unwrap();
        store
            .update(|s| {
                s.insert("page".into(), json!(2));
            })
            .unwrap();

        assert_eq!(
            store.load().unwrap(),
            Some(snapshot_of(json!({"url": "a", "page": 2})))
        );
    }

    #[test]
    fn test_progress_from_snapshot_keys() {
        let dir = tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.txt"));

        assert_eq!(CheckpointStore::progress(&store).unwrap(), None);

        store
            .save(&snapshot_of(json!({"scraped": 40, "total": 120})))
            .unwrap();
        assert_eq!(
            CheckpointStore::progress(&store).unwrap(),
            Some(ResumeProgress {
                scraped: 40,
                total: Some(120),
            })
        );
    }

    #[test]
    fn test_confirm_resume_with_policy() {
        let dir = tempdir().unwrap();
        let store = JsonCheckpointStore::new(dir.path().join("checkpoint.txt"));
        assert!(store.confirm_resume_with(&mut AlwaysResume).unwrap());
    }
}
