//! End-to-end job orchestration.
//!
//! A [`JobRunner`] validates a prompt, drives the stage pipeline, then
//! classifies the prompt and renders the artifact. Callers observe a job
//! through the ordered snapshot stream on its [`JobHandle`].
//!
//! Jobs are independent: submitting while another job is running starts a
//! second, uncoordinated job with its own log, progress and artifact.

mod handle;
#[cfg(test)]
mod integration_tests;
mod model;
mod runner;

pub use handle::JobHandle;
pub use model::{Job, JobSnapshot};
pub use runner::{validate_prompt, JobRunner, ABORT_REASON, COMPLETED_MESSAGE, SUBMITTED_MESSAGE};
