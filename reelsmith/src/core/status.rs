//! Job lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a job.
///
/// `Running` is the only non-terminal state. A job that fails validation
/// never enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// The prompt was empty after trimming; no pipeline ran.
    Rejected,
    /// The pipeline is advancing through its stages.
    Running,
    /// Every stage ran and the artifact is attached.
    Completed,
    /// The caller cancelled the job before completion.
    Aborted,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "rejected"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

impl JobState {
    /// Returns true if the state can no longer change.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Returns true if `next` is a legal successor of this state.
    #[must_use]
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Running, Self::Completed | Self::Aborted)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_display() {
        assert_eq!(JobState::Rejected.to_string(), "rejected");
        assert_eq!(JobState::Running.to_string(), "running");
        assert_eq!(JobState::Completed.to_string(), "completed");
        assert_eq!(JobState::Aborted.to_string(), "aborted");
    }

    #[test]
    fn test_job_state_is_terminal() {
        assert!(JobState::Rejected.is_terminal());
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Aborted.is_terminal());
        assert!(!JobState::Running.is_terminal());
    }

    #[test]
    fn test_transitions() {
        assert!(JobState::Running.can_transition_to(JobState::Completed));
        assert!(JobState::Running.can_transition_to(JobState::Aborted));
        assert!(!JobState::Completed.can_transition_to(JobState::Running));
        assert!(!JobState::Aborted.can_transition_to(JobState::Completed));
        assert!(!JobState::Rejected.can_transition_to(JobState::Running));
    }

    #[test]
    fn test_job_state_serialize() {
        let json = serde_json::to_string(&JobState::Aborted).unwrap();
        assert_eq!(json, r#""aborted""#);
    }
}
