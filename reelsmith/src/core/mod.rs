//! Core domain model types for reelsmith.
//!
//! - Job lifecycle states
//! - Timestamped log events
//! - Rendered artifacts

mod artifact;
mod event;
mod status;

pub use artifact::{Artifact, BLANK_DATA_URI};
pub use event::LogEvent;
pub use status::JobState;
