//! Typed observability events.

use serde::Serialize;
use uuid::Uuid;

/// An event published while a job runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// A prompt passed validation and the pipeline started.
    JobSubmitted {
        /// The job id.
        job_id: Uuid,
        /// Prompt length in characters.
        prompt_chars: usize,
        /// Number of stages scheduled.
        stage_count: usize,
    },
    /// A prompt failed validation.
    JobRejected {
        /// The job id.
        job_id: Uuid,
        /// The validation message.
        reason: String,
    },
    /// The pipeline advanced one stage.
    StageAdvanced {
        /// The job id.
        job_id: Uuid,
        /// Stage name.
        stage: String,
        /// Stage ordinal.
        ordinal: usize,
        /// Cumulative progress after this stage.
        progress: u8,
    },
    /// The renderer fell back to a blank artifact.
    RenderDegraded {
        /// The job id.
        job_id: Uuid,
        /// Why rendering degraded.
        reason: String,
    },
    /// The artifact was attached and the job finished.
    JobCompleted {
        /// The job id.
        job_id: Uuid,
        /// Theme group that matched the prompt.
        theme: String,
        /// Total job duration in milliseconds.
        duration_ms: f64,
    },
    /// The caller cancelled the job before completion.
    JobAborted {
        /// The job id.
        job_id: Uuid,
        /// Stages advanced before cancellation took effect.
        advanced: usize,
        /// Cancellation reason.
        reason: String,
    },
}

impl AgentEvent {
    /// Returns the dotted event type, e.g. `stage.advanced`.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::JobSubmitted { .. } => "job.submitted",
            Self::JobRejected { .. } => "job.rejected",
            Self::StageAdvanced { .. } => "stage.advanced",
            Self::RenderDegraded { .. } => "render.degraded",
            Self::JobCompleted { .. } => "job.completed",
            Self::JobAborted { .. } => "job.aborted",
        }
    }

    /// Returns the job id the event belongs to.
    #[must_use]
    pub fn job_id(&self) -> Uuid {
        match self {
            Self::JobSubmitted { job_id, .. }
            | Self::JobRejected { job_id, .. }
            | Self::StageAdvanced { job_id, .. }
            | Self::RenderDegraded { job_id, .. }
            | Self::JobCompleted { job_id, .. }
            | Self::JobAborted { job_id, .. } => *job_id,
        }
    }

    /// Serializes the event payload to JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        let id = Uuid::nil();
        let event = AgentEvent::StageAdvanced {
            job_id: id,
            stage: "render_frames".to_string(),
            ordinal: 4,
            progress: 70,
        };
        assert_eq!(event.event_type(), "stage.advanced");
        assert_eq!(event.job_id(), id);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = AgentEvent::JobRejected {
            job_id: Uuid::nil(),
            reason: "empty".to_string(),
        };
        let json = event.to_json();
        assert_eq!(json["type"], "job_rejected");
        assert_eq!(json["reason"], "empty");
    }
}
