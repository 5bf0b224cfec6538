use crate::resume::ResumeProgress;

/// The checkpoint persistence contract shared by every backend.
///
/// A store holds at most one snapshot at a time: `save` fully replaces any
/// prior snapshot, `load` returns the current one (or `None` when nothing
/// has been saved), and `clear` removes it. `progress` reports optional
/// figures for the resume prompt without exposing backend internals.
pub trait CheckpointStore {
    type Snapshot;
    type Error: std::error::Error + 'static;

    /// Persist `snapshot`, replacing any existing one.
    fn save(&self, snapshot: &Self::Snapshot) -> Result<(), Self::Error>;

    /// Read the current snapshot, `None` if none has been saved.
    fn load(&self) -> Result<Option<Self::Snapshot>, Self::Error>;

    /// Remove the snapshot. Succeeds when there is nothing to remove.
    fn clear(&self) -> Result<(), Self::Error>;

    /// Progress figures for the resume prompt, when the backend tracks any.
    fn progress(&self) -> Result<Option<ResumeProgress>, Self::Error>;
}
