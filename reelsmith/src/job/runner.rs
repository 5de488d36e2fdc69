//! Job runner: validation, stage pipeline, classification, rendering.

use super::handle::JobHandle;
use super::model::Job;
use crate::cancellation::CancellationToken;
use crate::config::AgentConfig;
use crate::core::Artifact;
use crate::errors::{PromptValidationError, RenderError};
use crate::events::{AgentEvent, EventSink, NoOpEventSink};
use crate::observability::SpanTimer;
use crate::pipeline::{PipelineOutcome, StagePipeline, StagePlan};
use crate::render::{ArtifactRenderer, RasterSurfaceProvider};
use crate::theme::{classify_named, ColorTheme};
use crate::utils::generate_uuid;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Log message recorded when a job starts running.
pub const SUBMITTED_MESSAGE: &str = "Agent initialized: Starting video generation process";
/// Log message recorded once the artifact is attached.
pub const COMPLETED_MESSAGE: &str = "Agent completed: Video ready for preview";
/// Cancellation reason used by [`JobHandle::cancel`].
pub const ABORT_REASON: &str = "Cancelled by caller";

/// Checks that a prompt has content once trimmed.
pub fn validate_prompt(prompt: &str) -> Result<&str, PromptValidationError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(PromptValidationError::empty());
    }
    Ok(trimmed)
}

/// Runs jobs end to end.
///
/// A runner holds only configuration; every job owns its own state, so one
/// runner can serve any number of independent jobs.
#[derive(Clone)]
pub struct JobRunner {
    config: AgentConfig,
    plan: StagePlan,
    renderer: ArtifactRenderer,
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for JobRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRunner")
            .field("config", &self.config)
            .field("stages", &self.plan.len())
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

impl JobRunner {
    /// Creates a runner with the video-generation plan, the software
    /// rasterizer and no event sink.
    #[must_use]
    pub fn new(config: AgentConfig) -> Self {
        let renderer = ArtifactRenderer::from_config(&config, Arc::new(RasterSurfaceProvider));
        Self {
            config,
            plan: StagePlan::default(),
            renderer,
            sink: Arc::new(NoOpEventSink),
        }
    }

    /// Replaces the stage plan.
    #[must_use]
    pub fn with_plan(mut self, plan: StagePlan) -> Self {
        self.plan = plan;
        self
    }

    /// Replaces the renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: ArtifactRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Sets the observability event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Returns the stage plan.
    #[must_use]
    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    /// Submits a prompt and runs the job on a new Tokio task.
    ///
    /// Must be called from within a Tokio runtime. Dropping the returned
    /// handle cancels the job.
    pub fn submit(&self, prompt: impl Into<String>) -> JobHandle {
        let id = generate_uuid();
        let prompt = prompt.into();
        let token = Arc::new(CancellationToken::new());
        token.on_cancel(move |reason| debug!(job_id = %id, reason, "Cancellation requested"));
        let (tx, rx) = mpsc::unbounded_channel();

        let runner = self.clone();
        let task_token = token.clone();
        let task = tokio::spawn(
            async move {
                runner
                    .execute(id, prompt, &task_token, |job| {
                        // The observer may have gone away; the job still finishes.
                        let _ = tx.send(job.clone());
                    })
                    .await
            }
            .instrument(info_span!("job", job_id = %id)),
        );

        JobHandle::new(id, token, rx, task)
    }

    /// Runs a job to a terminal state on the current task.
    ///
    /// `on_update` receives the job after every change: once on
    /// submission (or rejection), once per stage, and once at the end.
    pub async fn run<F>(
        &self,
        prompt: impl Into<String>,
        token: &CancellationToken,
        on_update: F,
    ) -> Job
    where
        F: FnMut(&Job),
    {
        self.execute(generate_uuid(), prompt.into(), token, on_update).await
    }

    async fn execute<F>(
        &self,
        id: Uuid,
        prompt: String,
        token: &CancellationToken,
        mut on_update: F,
    ) -> Job
    where
        F: FnMut(&Job),
    {
        if let Err(err) = validate_prompt(&prompt) {
            info!(job_id = %id, "Prompt rejected: {}", err);
            let job = Job::rejected(id, prompt, &err);
            self.sink
                .emit(&AgentEvent::JobRejected {
                    job_id: id,
                    reason: err.message,
                })
                .await;
            on_update(&job);
            return job;
        }

        let timer = SpanTimer::start("job");
        let mut job = Job::running(id, prompt, SUBMITTED_MESSAGE);
        info!(job_id = %id, stages = self.plan.len(), "Job submitted");
        self.sink
            .emit(&AgentEvent::JobSubmitted {
                job_id: id,
                prompt_chars: job.prompt.chars().count(),
                stage_count: self.plan.len(),
            })
            .await;
        on_update(&job);

        let pipeline = StagePipeline::new(self.plan.clone(), self.config.stage_delay());
        let outcome = pipeline
            .run(token, |stage| {
                job.advance(stage);
                self.sink.try_emit(&AgentEvent::StageAdvanced {
                    job_id: id,
                    stage: stage.name.clone(),
                    ordinal: stage.ordinal,
                    progress: stage.progress,
                });
                on_update(&job);
            })
            .await;

        match outcome {
            PipelineOutcome::Completed => {
                let kind = classify_named(&job.prompt);
                let (artifact, degraded) = self.render(&job.prompt, kind.theme()).await;
                if let Some(err) = degraded {
                    self.sink
                        .emit(&AgentEvent::RenderDegraded {
                            job_id: id,
                            reason: err.to_string(),
                        })
                        .await;
                }
                job.complete(artifact, COMPLETED_MESSAGE);

                let duration_ms = timer.finish();
                info!(job_id = %id, theme = %kind, duration_ms, "Job completed");
                self.sink
                    .emit(&AgentEvent::JobCompleted {
                        job_id: id,
                        theme: kind.to_string(),
                        duration_ms,
                    })
                    .await;
            }
            PipelineOutcome::Cancelled { advanced } => {
                job.abort();
                let reason = token.reason().unwrap_or_else(|| ABORT_REASON.to_string());
                info!(job_id = %id, advanced, reason = %reason, "Job aborted");
                self.sink
                    .emit(&AgentEvent::JobAborted {
                        job_id: id,
                        advanced,
                        reason,
                    })
                    .await;
            }
        }

        on_update(&job);
        job
    }

    /// Renders on the blocking pool so rasterizing and encoding never stall
    /// a runtime worker.
    async fn render(&self, prompt: &str, theme: ColorTheme) -> (Artifact, Option<RenderError>) {
        let renderer = self.renderer.clone();
        let owned = prompt.to_string();
        let (width, height) = (self.config.canvas_width, self.config.canvas_height);

        let rendered = tokio::task::spawn_blocking(move || {
            renderer.render_checked(&owned, theme, width, height)
        })
        .await;

        match rendered {
            Ok(result) => result,
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => {
                warn!(error = %err, "Render task cancelled, rendering inline");
                self.renderer.render_checked(prompt, theme, width, height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JobState;
    use crate::events::CollectingEventSink;
    use crate::pipeline::Stage;
    use crate::testing::{assert_log_messages, RecordingSurfaceProvider, UnavailableSurfaceProvider};
    use crate::theme::ThemeKind;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn fast_runner() -> JobRunner {
        JobRunner::new(
            AgentConfig::new()
                .with_stage_delay(Duration::from_millis(10))
                .with_canvas(64, 36),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_every_change() {
        let token = CancellationToken::new();
        let mut updates = Vec::new();

        let job = fast_runner()
            .run("blue lagoon", &token, |job| updates.push((job.state, job.progress)))
            .await;

        assert_eq!(job.state, JobState::Completed);
        // submission + 8 stages + completion
        assert_eq!(updates.len(), 10);
        assert_eq!(updates[0], (JobState::Running, 0));
        assert_eq!(updates[8], (JobState::Running, 100));
        assert_eq!(updates[9], (JobState::Completed, 100));
        assert_eq!(job.artifact.unwrap().theme, ThemeKind::Ocean.theme());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_plan() {
        let plan = StagePlan::new(vec![
            Stage::new("think", 50, "Thinking..."),
            Stage::new("done", 100, "Done."),
        ])
        .unwrap();
        let token = CancellationToken::new();

        let job = fast_runner().with_plan(plan).run("x", &token, |_| {}).await;

        assert_log_messages(
            &job.logs,
            &[SUBMITTED_MESSAGE, "Thinking...", "Done.", COMPLETED_MESSAGE],
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_are_published_in_order() {
        let sink = Arc::new(CollectingEventSink::new());
        let token = CancellationToken::new();

        fast_runner()
            .with_event_sink(sink.clone())
            .run("forest", &token, |_| {})
            .await;

        let mut expected = vec!["job.submitted"];
        expected.extend(std::iter::repeat("stage.advanced").take(8));
        expected.push("job.completed");
        assert_eq!(sink.event_types(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_degraded_render_still_completes() {
        let sink = Arc::new(CollectingEventSink::new());
        let runner = fast_runner()
            .with_renderer(ArtifactRenderer::new(Arc::new(UnavailableSurfaceProvider)))
            .with_event_sink(sink.clone());
        let token = CancellationToken::new();

        let job = runner.run("night sky", &token, |_| {}).await;

        assert_eq!(job.state, JobState::Completed);
        assert!(job.artifact.as_ref().unwrap().degraded);
        assert_eq!(job.logs.last().unwrap().message, COMPLETED_MESSAGE);
        assert_eq!(sink.events_of_type("render.").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_renders_once_and_only_on_completion() {
        let provider = Arc::new(RecordingSurfaceProvider::new());
        let runner = fast_runner().with_renderer(ArtifactRenderer::new(provider.clone()));

        let token = CancellationToken::new();
        let job = runner.run("orange dunes", &token, |_| {}).await;
        assert_eq!(job.state, JobState::Completed);
        assert_eq!(provider.export_count(), 1);

        let calls = provider.calls();
        let gradient = calls.iter().position(|c| c.starts_with("gradient")).unwrap();
        let export = calls.iter().position(|c| c == "export").unwrap();
        assert!(gradient < export);
        assert!(calls[gradient].ends_with(&ThemeKind::Sunset.theme().to_string()));

        let token = CancellationToken::new();
        let aborted = runner
            .run("orange dunes", &token, |job| {
                if job.progress == 25 {
                    token.cancel(ABORT_REASON);
                }
            })
            .await;
        assert_eq!(aborted.state, JobState::Aborted);

        let token = CancellationToken::new();
        let rejected = runner.run("  ", &token, |_| {}).await;
        assert_eq!(rejected.state, JobState::Rejected);

        assert_eq!(provider.export_count(), 1);
        assert_eq!(provider.calls().len(), calls.len());
    }

    #[test]
    fn test_validate_prompt() {
        assert_eq!(validate_prompt("  hi  "), Ok("hi"));
        assert_eq!(validate_prompt(""), Err(PromptValidationError::empty()));
        assert!(validate_prompt("\u{3000}\t").is_err());
    }

    #[tokio::test]
    async fn test_whitespace_prompt_rejected_without_pipeline() {
        let sink = Arc::new(CollectingEventSink::new());
        let token = CancellationToken::new();
        let mut updates = 0;

        let job = fast_runner()
            .with_event_sink(sink.clone())
            .run(" \t\n", &token, |_| updates += 1)
            .await;

        assert_eq!(job.state, JobState::Rejected);
        assert_eq!(updates, 1);
        assert_eq!(sink.event_types(), vec!["job.rejected"]);
    }
}
