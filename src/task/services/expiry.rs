//! Expiry processor: hand expired tasks to the downstream workflow.

use std::sync::Arc;

use crate::task::{
    domain::TaskStatus,
    ports::{ExpiryRecord, TaskStore, WorkflowInput, WorkflowOrchestrator},
    services::TaskServiceResult,
};

/// Consumes queued expiry records and starts workflow executions.
///
/// The queue substrate delivers records at least once; the processor
/// re-validates that the task is still recorded expired before handing
/// off, and keeps no retry bookkeeping of its own; redelivery is the
/// queue's concern.
#[derive(Clone)]
pub struct ExpiryProcessor<S, W>
where
    S: TaskStore,
    W: WorkflowOrchestrator,
{
    store: Arc<S>,
    workflow: Arc<W>,
}

impl<S, W> ExpiryProcessor<S, W>
where
    S: TaskStore,
    W: WorkflowOrchestrator,
{
    /// Creates a new processor.
    #[must_use]
    pub const fn new(store: Arc<S>, workflow: Arc<W>) -> Self {
        Self { store, workflow }
    }

    /// Processes one expiry record.
    ///
    /// A record whose task is missing, or no longer expired (reopened or
    /// completed since enqueue), is dropped without a workflow start.
    ///
    /// # Errors
    ///
    /// Store and orchestrator failures surface so the queue substrate can
    /// redeliver the record.
    pub async fn process(&self, record: &ExpiryRecord) -> TaskServiceResult<()> {
        let Some(task) = self.store.get(record.task_id).await? else {
            tracing::warn!(task_id = %record.task_id, "expiry record for missing task dropped");
            return Ok(());
        };
        if task.status() != TaskStatus::Expired {
            tracing::info!(
                task_id = %task.id(),
                status = task.status().as_str(),
                "task no longer expired; workflow start skipped"
            );
            return Ok(());
        }

        self.workflow
            .start(task.id(), &WorkflowInput::new(task.id()))
            .await?;
        tracing::info!(task_id = %task.id(), "expiry workflow started");
        Ok(())
    }
}
