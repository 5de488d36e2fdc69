//! Test assertions for jobs and snapshots.

use crate::core::{JobState, LogEvent};

/// Asserts that progress values strictly increase and end at 100.
pub fn assert_progress_strictly_increasing(values: &[u8]) {
    assert!(
        values.windows(2).all(|w| w[0] < w[1]),
        "Expected strictly increasing progress, got {:?}",
        values
    );
    assert_eq!(
        values.last(),
        Some(&100),
        "Expected progress to end at 100, got {:?}",
        values
    );
}

/// Asserts that the state is terminal and equals `expected`.
pub fn assert_terminal_state(state: JobState, expected: JobState) {
    assert!(state.is_terminal(), "Expected a terminal state, got {state}");
    assert_eq!(state, expected, "Expected state {expected}, got {state}");
}

/// Asserts the log messages match `expected`, in order.
pub fn assert_log_messages(logs: &[LogEvent], expected: &[&str]) {
    let actual: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(actual, expected, "Log messages differ");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_assertion_passes() {
        assert_progress_strictly_increasing(&[10, 25, 100]);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn test_progress_assertion_rejects_repeat() {
        assert_progress_strictly_increasing(&[10, 10, 100]);
    }

    #[test]
    #[should_panic(expected = "end at 100")]
    fn test_progress_assertion_requires_completion() {
        assert_progress_strictly_increasing(&[10, 25]);
    }

    #[test]
    fn test_terminal_state_assertion() {
        assert_terminal_state(JobState::Completed, JobState::Completed);
    }

    #[test]
    #[should_panic(expected = "terminal")]
    fn test_terminal_state_assertion_rejects_running() {
        assert_terminal_state(JobState::Running, JobState::Running);
    }

    #[test]
    fn test_log_messages() {
        let logs = vec![LogEvent::now("a"), LogEvent::now("b")];
        assert_log_messages(&logs, &["a", "b"]);
    }
}
