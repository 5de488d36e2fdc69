//! # Reelsmith
//!
//! A staged prompt-to-preview agent simulator.
//!
//! Reelsmith takes a free-text video description and walks it through a
//! fixed sequence of timed stages, then renders a still preview image:
//!
//! - **Prompt classification**: keyword groups map a prompt to a two-color theme
//! - **Artifact rendering**: a themed gradient with text overlay, encoded as a PNG data URI
//! - **Stage pipeline**: strictly sequential stages with cumulative progress
//! - **Job orchestration**: validated jobs with an append-only log and observable snapshots
//! - **Cancellation handling**: cooperative cancellation with no updates after cancel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reelsmith::prelude::*;
//!
//! # async fn demo() -> Result<(), ReelsmithError> {
//! let runner = JobRunner::new(AgentConfig::default());
//! let mut handle = runner.submit("A sunset over the ocean");
//!
//! while let Some(snapshot) = handle.next_update().await {
//!     println!("{}% {:?}", snapshot.progress, snapshot.state);
//! }
//!
//! let job = handle.wait().await?;
//! assert_eq!(job.state, JobState::Completed);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod config;
pub mod core;
pub mod errors;
pub mod events;
pub mod job;
pub mod observability;
pub mod pipeline;
pub mod render;
pub mod testing;
pub mod theme;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::CancellationToken;
    pub use crate::config::AgentConfig;
    pub use crate::core::{Artifact, JobState, LogEvent};
    pub use crate::errors::{
        PlanValidationError, PromptValidationError, ReelsmithError, RenderError,
    };
    pub use crate::events::{AgentEvent, EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::job::{Job, JobHandle, JobRunner, JobSnapshot};
    pub use crate::pipeline::{PipelineOutcome, Stage, StagePipeline, StagePlan};
    pub use crate::render::{excerpt, ArtifactRenderer, SurfaceProvider};
    pub use crate::theme::{classify, classify_named, ColorTheme, ThemeKind};
    pub use crate::utils::{generate_uuid, now_utc, Timestamp};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn prelude_classifies() {
        assert_eq!(classify_named("Dark forest"), ThemeKind::Forest);
        assert_eq!(excerpt("abc", 2), "ab");
    }
}
