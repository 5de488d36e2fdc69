//! End-to-end tests for submitted jobs.

#[cfg(test)]
mod tests {
    use crate::config::AgentConfig;
    use crate::core::JobState;
    use crate::events::CollectingEventSink;
    use crate::job::{JobRunner, COMPLETED_MESSAGE, SUBMITTED_MESSAGE};
    use crate::pipeline::StagePlan;
    use crate::testing::{
        assert_log_messages, assert_progress_strictly_increasing, assert_terminal_state,
    };
    use crate::theme::ThemeKind;
    use futures::StreamExt;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use std::time::Duration;

    fn stage_messages() -> Vec<String> {
        StagePlan::video_generation()
            .iter()
            .map(|s| s.message.clone())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_sunset_prompt_completes() {
        let runner = JobRunner::new(AgentConfig::default());
        let mut handle = runner.submit("A sunset over the ocean");

        let snapshots: Vec<_> = handle.observe().collect().await;
        let job = snapshots.last().unwrap().clone();

        assert_terminal_state(job.state, JobState::Completed);
        assert_eq!(job.progress, 100);

        let stages = stage_messages();
        let mut expected = vec![SUBMITTED_MESSAGE];
        expected.extend(stages.iter().map(String::as_str));
        expected.push(COMPLETED_MESSAGE);
        assert_log_messages(&job.logs, &expected);

        let artifact = job.artifact.as_ref().unwrap();
        assert_eq!(artifact.theme, ThemeKind::Sunset.theme());
        assert!(artifact.has_payload());
        assert!(!artifact.degraded);
        assert_eq!(artifact.mime_type(), Some("image/png"));
        assert_eq!((artifact.width, artifact.height), (1280, 720));
        assert_eq!(artifact.excerpt(), Some("A sunset over the ocean"));

        // Progress seen by the observer, ignoring the submission snapshot.
        let progress: Vec<u8> = snapshots[1..9].iter().map(|s| s.progress).collect();
        assert_progress_strictly_increasing(&progress);
        assert!(snapshots[..9].iter().all(|s| s.artifact.is_none()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_prompts_are_rejected() {
        let runner = JobRunner::new(AgentConfig::default());

        for prompt in ["", "   ", "\n\t "] {
            let mut handle = runner.submit(prompt);
            let snapshots: Vec<_> = handle.observe().collect().await;

            assert_eq!(snapshots.len(), 1);
            let job = &snapshots[0];
            assert_terminal_state(job.state, JobState::Rejected);
            assert_eq!(job.progress, 0);
            assert!(job.artifact.is_none());
            assert_log_messages(&job.logs, &["Error: Please enter a video description"]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_second_stage() {
        let sink = Arc::new(CollectingEventSink::new());
        let runner = JobRunner::new(AgentConfig::default()).with_event_sink(sink.clone());
        let mut handle = runner.submit("forest walk");

        while let Some(snapshot) = handle.next_update().await {
            if snapshot.progress == 25 {
                handle.cancel();
                break;
            }
        }

        let mut rest = Vec::new();
        while let Some(snapshot) = handle.next_update().await {
            rest.push(snapshot);
        }

        assert_eq!(rest.len(), 1);
        let job = &rest[0];
        assert_terminal_state(job.state, JobState::Aborted);
        assert_eq!(job.progress, 25);
        assert!(job.artifact.is_none());

        let stages = stage_messages();
        assert_log_messages(
            &job.logs,
            &[SUBMITTED_MESSAGE, stages[0].as_str(), stages[1].as_str()],
        );

        assert_eq!(sink.events_of_type("stage.").len(), 2);
        assert_eq!(sink.events_of_type("job.aborted").len(), 1);
        assert!(sink.events_of_type("job.completed").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_completion_is_noop() {
        let runner = JobRunner::new(AgentConfig::new().with_canvas(64, 36));
        let mut handle = runner.submit("red balloon");

        let last = handle.observe().collect::<Vec<_>>().await.pop().unwrap();
        handle.cancel();
        let job = handle.wait().await.unwrap();

        assert_eq!(last.state, JobState::Completed);
        assert_eq!(job, last);
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_prompt_excerpt_is_bounded() {
        let runner = JobRunner::new(AgentConfig::new().with_canvas(64, 36));
        let prompt = "ü".repeat(80);

        let job = runner.submit(prompt.as_str()).wait().await.unwrap();

        let artifact = job.artifact.unwrap();
        assert_eq!(artifact.prompt, prompt);
        assert_eq!(artifact.excerpt().unwrap().chars().count(), 50);
        assert_eq!(artifact.theme, ThemeKind::Default.theme());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_runs_without_waiting() {
        let runner = JobRunner::new(
            AgentConfig::new()
                .with_stage_delay(Duration::ZERO)
                .with_canvas(64, 36),
        );
        let start = tokio::time::Instant::now();

        let job = runner.submit("night drive").wait().await.unwrap();

        assert_eq!(job.state, JobState::Completed);
        assert_eq!(job.logs.len(), 10);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_lines_are_timestamped() {
        let runner = JobRunner::new(AgentConfig::new().with_canvas(64, 36));
        let job = runner.submit("blue").wait().await.unwrap();

        let lines = job.log_lines();
        assert_eq!(lines.len(), 10);
        for line in &lines {
            // "[HH:MM:SS] message"
            assert_eq!(&line[0..1], "[");
            assert_eq!(&line[9..11], "] ");
        }
        assert!(lines[0].ends_with(SUBMITTED_MESSAGE));
    }
}
