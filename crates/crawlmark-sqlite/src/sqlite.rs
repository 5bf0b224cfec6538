use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info};

use crawlmark_core::{
    confirm_resume, CheckpointStore, InteractivePrompt, ResumeError, ResumePolicy, ResumeProgress,
};

use crate::error::StorageResult;
use crate::StorageError;

/// SQLite-backed checkpoint store holding a single last-processed-id.
///
/// The table keeps at most one row at rest: every save deletes all rows and
/// inserts the new value inside one transaction, so a crash mid-save never
/// leaves two rows behind. The autoincrement primary key only orders
/// insertions and carries no meaning of its own.
pub struct SqliteCheckpointStore {
    conn: Mutex<Connection>,
}

/// Conventional database file name used by CLI defaults.
pub const DEFAULT_DB: &str = "checkpoint.db";

impl SqliteCheckpointStore {
    /// Open or create a checkpoint database at the given path.
    ///
    /// Ensures the schema exists; calling repeatedly against the same path
    /// never alters existing data.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening checkpoint store");

        let conn = Connection::open(path)?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory checkpoint store (for testing).
    pub fn in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Replace the stored checkpoint with `id`.
    ///
    /// Delete and insert run in one transaction; exactly one row exists
    /// after the call succeeds.
    pub fn save_last_id(&self, id: i64) -> StorageResult<()> {
        let mut conn = self.conn.lock().unwrap();

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM checkpoint", [])?;
        tx.execute(
            "INSERT INTO checkpoint (last_processed_id) VALUES (?1)",
            rusqlite::params![id],
        )?;
        tx.commit()?;

        info!(last_processed_id = id, "saved checkpoint");
        Ok(())
    }

    /// The most recently saved id, or `0` when no checkpoint exists.
    ///
    /// `0` means "nothing processed"; an empty table is never an error.
    pub fn load_last_id(&self) -> StorageResult<i64> {
        Ok(self.load_latest()?.unwrap_or(0))
    }

    /// Delete all rows; the table schema remains.
    pub fn clear(&self) -> StorageResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM checkpoint", [])?;
        info!("cleared checkpoint");
        Ok(())
    }

    /// Block on stdin/stdout for a resume decision.
    pub fn confirm_resume(&self) -> Result<bool, ResumeError<StorageError>> {
        self.confirm_resume_with(&mut InteractivePrompt::stdio())
    }

    /// Resume decision through an injected policy.
    pub fn confirm_resume_with<P: ResumePolicy>(
        &self,
        policy: &mut P,
    ) -> Result<bool, ResumeError<StorageError>> {
        confirm_resume(self, policy)
    }

    fn load_latest(&self) -> StorageResult<Option<i64>> {
        let conn = self.conn.lock().unwrap();

        let result = conn.query_row(
            "SELECT last_processed_id FROM checkpoint ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get::<_, Option<i64>>(0),
        );

        match result {
            Ok(id) => {
                let id = id.unwrap_or(0);
                debug!(last_processed_id = id, "loaded checkpoint");
                Ok(Some(id))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS checkpoint (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            last_processed_id INTEGER
        )",
        [],
    )?;
    Ok(())
}

impl CheckpointStore for SqliteCheckpointStore {
    type Snapshot = i64;
    type Error = StorageError;

    fn save(&self, snapshot: &i64) -> StorageResult<()> {
        self.save_last_id(*snapshot)
    }

    fn load(&self) -> StorageResult<Option<i64>> {
        self.load_latest()
    }

    fn clear(&self) -> StorageResult<()> {
        SqliteCheckpointStore::clear(self)
    }

    // The relational prompt reports no progress figures.
    fn progress(&self) -> StorageResult<Option<ResumeProgress>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crawlmark_core::AlwaysResume;
    use tempfile::tempdir;

    use super::*;

    fn row_count(store: &SqliteCheckpointStore) -> i64 {
        let conn = store.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM checkpoint", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let store = SqliteCheckpointStore::in_memory().unwrap();
        assert_eq!(store.load_last_id().unwrap(), 0);
    }

    #[test]
    fn test_roundtrip_including_edge_ids() {
        let store = SqliteCheckpointStore::in_memory().unwrap();

        for id in [0, -1, 42, i64::MAX, i64::MIN] {
            store.save_last_id(id).unwrap();
            assert_eq!(store.load_last_id().unwrap(), id);
        }
    }

    #[test]
    fn test_save_keeps_at_most_one_row() {
        let store = SqliteCheckpointStore::in_memory().unwrap();

        store.save_last_id(42).unwrap();
        store.save_last_id(7).unwrap();

        assert_eq!(store.load_last_id().unwrap(), 7);
        assert_eq!(row_count(&store), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = SqliteCheckpointStore::in_memory().unwrap();

        store.save_last_id(5).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();

        assert_eq!(store.load_last_id().unwrap(), 0);
        assert_eq!(row_count(&store), 0);
    }

    #[test]
    fn test_open_is_idempotent_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("checkpoint.db");

        {
            let store = SqliteCheckpointStore::open(&path).unwrap();
            store.save_last_id(99).unwrap();
        }

        // Reopening neither recreates nor alters the stored row.
        let store = SqliteCheckpointStore::open(&path).unwrap();
        assert_eq!(store.load_last_id().unwrap(), 99);
        assert_eq!(row_count(&store), 1);
    }

    #[test]
    fn test_trait_load_is_none_when_empty() {
        let store = SqliteCheckpointStore::in_memory().unwrap();
        assert_eq!(CheckpointStore::load(&store).unwrap(), None);

        CheckpointStore::save(&store, &3).unwrap();
        assert_eq!(CheckpointStore::load(&store).unwrap(), Some(3));
    }

    #[test]
    fn test_confirm_resume_with_policy() {
        let store = SqliteCheckpointStore::in_memory().unwrap();
        assert!(store.confirm_resume_with(&mut AlwaysResume).unwrap());
    }
}
