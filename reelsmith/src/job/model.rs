//! The job aggregate.

use crate::core::{Artifact, JobState, LogEvent};
use crate::errors::PromptValidationError;
use crate::pipeline::Stage;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// One invocation of the pipeline for a single prompt.
///
/// The log is append-only; every stage advance and every logged state
/// change adds exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier.
    pub id: Uuid,
    /// The prompt as submitted.
    pub prompt: String,
    /// Cumulative progress, 0..=100.
    pub progress: u8,
    /// Ordered history.
    pub logs: Vec<LogEvent>,
    /// Lifecycle state.
    pub state: JobState,
    /// Present only once the job has completed.
    pub artifact: Option<Artifact>,
}

/// A point-in-time copy of a job, as delivered to observers.
pub type JobSnapshot = Job;

impl Job {
    /// Creates a job that failed validation.
    pub(crate) fn rejected(id: Uuid, prompt: String, err: &PromptValidationError) -> Self {
        Self {
            id,
            prompt,
            progress: 0,
            logs: vec![LogEvent::now(err.message.clone())],
            state: JobState::Rejected,
            artifact: None,
        }
    }

    /// Creates a running job with its submission entry logged.
    pub(crate) fn running(id: Uuid, prompt: String, submitted_message: &str) -> Self {
        Self {
            id,
            prompt,
            progress: 0,
            logs: vec![LogEvent::now(submitted_message)],
            state: JobState::Running,
            artifact: None,
        }
    }

    pub(crate) fn advance(&mut self, stage: &Stage) {
        self.progress = stage.progress;
        self.logs.push(LogEvent::now(stage.message.clone()));
    }

    /// Attaches the artifact before logging completion.
    pub(crate) fn complete(&mut self, artifact: Artifact, message: &str) {
        if self.transition(JobState::Completed) {
            self.artifact = Some(artifact);
            self.logs.push(LogEvent::now(message));
        }
    }

    pub(crate) fn abort(&mut self) {
        self.transition(JobState::Aborted);
    }

    fn transition(&mut self, next: JobState) -> bool {
        if !self.state.can_transition_to(next) {
            warn!(
                job_id = %self.id,
                from = %self.state,
                to = %next,
                "Ignoring illegal job transition"
            );
            return false;
        }
        self.state = next;
        true
    }

    /// Returns true once the job can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the log rendered as `[HH:MM:SS] message` lines.
    #[must_use]
    pub fn log_lines(&self) -> Vec<String> {
        self.logs.iter().map(ToString::to_string).collect()
    }
}
