pub mod error;
pub mod integrations;
pub mod json;
pub mod resume;
pub mod store;

pub use error::{CheckpointError, CheckpointResult};
pub use integrations::{BrowserSaver, HttpSaver, SpiderSaver, WebDriverSaver};
pub use json::{JsonCheckpointStore, Snapshot, DEFAULT_FILE};
pub use resume::{
    confirm_resume, AlwaysResume, InteractivePrompt, NeverResume, ResumeError, ResumePolicy,
    ResumeProgress,
};
pub use store::CheckpointStore;
