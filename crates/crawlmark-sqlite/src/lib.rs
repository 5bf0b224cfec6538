mod error;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use sqlite::{SqliteCheckpointStore, DEFAULT_DB};
