use std::path::PathBuf;

use thiserror::Error;

/// Errors from the JSON checkpoint store.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint not serializable: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("corrupt checkpoint file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type CheckpointResult<T> = Result<T, CheckpointError>;
