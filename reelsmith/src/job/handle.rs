//! Caller-side handle to a submitted job.

use super::model::{Job, JobSnapshot};
use super::runner::ABORT_REASON;
use crate::cancellation::CancellationToken;
use crate::errors::ReelsmithError;
use futures::Stream;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Cancels the job when the handle is dropped.
#[derive(Debug)]
struct CancelOnDrop(Arc<CancellationToken>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel("Job handle dropped");
    }
}

/// A live, observable job.
///
/// Snapshots arrive in order and end with one in a terminal state, after
/// which the stream closes. Dropping the handle cancels the job.
#[derive(Debug)]
pub struct JobHandle {
    id: Uuid,
    token: Arc<CancellationToken>,
    updates: mpsc::UnboundedReceiver<JobSnapshot>,
    task: JoinHandle<Job>,
    _guard: CancelOnDrop,
}

impl JobHandle {
    pub(crate) fn new(
        id: Uuid,
        token: Arc<CancellationToken>,
        updates: mpsc::UnboundedReceiver<JobSnapshot>,
        task: JoinHandle<Job>,
    ) -> Self {
        Self {
            id,
            _guard: CancelOnDrop(token.clone()),
            token,
            updates,
            task,
        }
    }

    /// Returns the job id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Requests cancellation. No stage advances after this returns.
    pub fn cancel(&self) {
        self.cancel_with_reason(ABORT_REASON);
    }

    /// Requests cancellation with a reason; the first reason wins.
    pub fn cancel_with_reason(&self, reason: impl Into<String>) {
        self.token.cancel(reason);
    }

    /// Returns whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the next snapshot; `None` once the job has finished and
    /// every snapshot was delivered.
    pub async fn next_update(&mut self) -> Option<JobSnapshot> {
        self.updates.recv().await
    }

    /// Streams snapshots until the job reaches a terminal state.
    pub fn observe(&mut self) -> impl Stream<Item = JobSnapshot> + '_ {
        futures::stream::poll_fn(move |cx| self.updates.poll_recv(cx))
    }

    /// Waits for the job to finish and returns its final state.
    ///
    /// A panic inside the job is resumed on the caller.
    pub async fn wait(self) -> Result<Job, ReelsmithError> {
        let Self { task, _guard, .. } = self;
        match task.await {
            Ok(job) => Ok(job),
            Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
            Err(err) => Err(ReelsmithError::Runtime(err.to_string())),
        }
    }
}
