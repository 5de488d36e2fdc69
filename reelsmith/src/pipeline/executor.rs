//! Timed, strictly sequential stage execution.

use super::spec::{Stage, StagePlan};
use crate::cancellation::CancellationToken;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// How a pipeline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Every stage advanced.
    Completed,
    /// Cancellation stopped the run.
    Cancelled {
        /// Stages that advanced before cancellation took effect.
        advanced: usize,
    },
}

/// Walks a [`StagePlan`] one stage at a time.
///
/// Each stage waits the configured delay, then fires the advance callback
/// exactly once. Stage k+1 never starts before stage k's callback returns.
#[derive(Debug, Clone)]
pub struct StagePipeline {
    plan: StagePlan,
    delay: Duration,
}

impl StagePipeline {
    /// Creates a pipeline over `plan` with a fixed per-stage delay.
    #[must_use]
    pub fn new(plan: StagePlan, delay: Duration) -> Self {
        Self { plan, delay }
    }

    /// Returns the plan.
    #[must_use]
    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    /// Returns the per-stage delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the total time a run takes when not cancelled.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.delay * u32::try_from(self.plan.len()).unwrap_or(u32::MAX)
    }

    /// Runs every stage in order, calling `on_advance` once per stage.
    ///
    /// Cancellation is checked before each delay and again once it elapses;
    /// an in-flight delay is not interrupted. The second check and the
    /// callback run under the token's gate, so no callback starts after
    /// `cancel` returns on any thread. A panic in `on_advance` propagates.
    pub async fn run<F>(&self, token: &CancellationToken, mut on_advance: F) -> PipelineOutcome
    where
        F: FnMut(&Stage),
    {
        for stage in &self.plan {
            if token.is_cancelled() {
                return Self::cancelled(stage);
            }

            if self.delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(self.delay).await;
            }

            let advanced = token.run_if_active(|| {
                debug!(
                    stage = %stage.name,
                    ordinal = stage.ordinal,
                    progress = stage.progress,
                    "Stage advanced"
                );
                on_advance(stage);
            });
            if advanced.is_none() {
                return Self::cancelled(stage);
            }
        }

        PipelineOutcome::Completed
    }

    fn cancelled(next: &Stage) -> PipelineOutcome {
        debug!(next_stage = %next.name, "Pipeline cancelled");
        PipelineOutcome::Cancelled {
            advanced: next.ordinal,
        }
    }
}

impl Default for StagePipeline {
    fn default() -> Self {
        Self::new(StagePlan::default(), Duration::from_secs(1))
    }
}
