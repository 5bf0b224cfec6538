mod clear;
mod set;
mod status;

pub use clear::cmd_clear;
pub use set::cmd_set;
pub use status::cmd_status;
