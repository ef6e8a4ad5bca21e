//! Entry points invoked by the trigger registry when deadlines approach
//! and pass.
//!
//! Delivery is at-least-once, so both handlers re-fetch the task and
//! re-check that it is still open before acting; duplicate or late
//! firings degrade to no-ops.

use mockable::Clock;
use std::sync::Arc;

use crate::notify::{
    domain::{NotificationContext, NotificationKind},
    ports::NotificationDispatcher,
    services::NotificationCoordinator,
};
use crate::task::{
    domain::{Task, TaskStatus},
    ports::{ExpiryQueue, ExpiryRecord, TaskStore, TriggerPayload, TriggerRegistry},
    services::{DeadlineScheduler, TaskServiceResult},
};

/// Handlers for warning and final trigger firings.
#[derive(Clone)]
pub struct TriggerHandlers<S, R, D, Q, C>
where
    S: TaskStore,
    R: TriggerRegistry,
    D: NotificationDispatcher,
    Q: ExpiryQueue,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    scheduler: DeadlineScheduler<R, C>,
    coordinator: NotificationCoordinator<D>,
    queue: Arc<Q>,
}

impl<S, R, D, Q, C> TriggerHandlers<S, R, D, Q, C>
where
    S: TaskStore,
    R: TriggerRegistry,
    D: NotificationDispatcher,
    Q: ExpiryQueue,
    C: Clock + Send + Sync,
{
    /// Creates the handler pair.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        scheduler: DeadlineScheduler<R, C>,
        coordinator: NotificationCoordinator<D>,
        queue: Arc<Q>,
    ) -> Self {
        Self {
            store,
            scheduler,
            coordinator,
            queue,
        }
    }

    /// Handles a warning trigger firing.
    ///
    /// Emits the warning notification, arms a fresh final trigger at the
    /// task's deadline, then cancels its own registration. A missing or
    /// no-longer-open task is a no-op.
    ///
    /// # Errors
    ///
    /// Store and registry failures surface so the trigger substrate can
    /// redeliver; the notification itself is best-effort.
    pub async fn handle_warning(&self, payload: &TriggerPayload) -> TaskServiceResult<()> {
        let Some(task) = self.store.get(payload.task_id).await? else {
            tracing::info!(task_id = %payload.task_id, "warning trigger for missing task ignored");
            return Ok(());
        };
        if task.status() != TaskStatus::Open {
            tracing::info!(
                task_id = %task.id(),
                status = task.status().as_str(),
                "warning trigger for non-open task ignored"
            );
            return Ok(());
        }

        self.coordinator
            .notify(event_context(NotificationKind::Warning, &task))
            .await;
        self.scheduler.arm_final(&task).await?;
        self.scheduler.cancel_warning(task.id()).await?;
        tracing::info!(task_id = %task.id(), "deadline warning handled");
        Ok(())
    }

    /// Handles a final trigger firing.
    ///
    /// Expires the task, enqueues the expiry record, emits the escalation
    /// notification, and cancels the remaining registrations. A missing
    /// or no-longer-open task is a no-op.
    ///
    /// # Errors
    ///
    /// Store, queue, and registry failures surface so the trigger
    /// substrate can redeliver; the notification itself is best-effort.
    pub async fn handle_final(&self, payload: &TriggerPayload) -> TaskServiceResult<()> {
        let Some(mut task) = self.store.get(payload.task_id).await? else {
            tracing::info!(task_id = %payload.task_id, "final trigger for missing task ignored");
            return Ok(());
        };
        if task.status() != TaskStatus::Open {
            tracing::info!(
                task_id = %task.id(),
                status = task.status().as_str(),
                "final trigger for non-open task ignored"
            );
            return Ok(());
        }

        task.expire()?;
        self.store.put(&task).await?;
        self.queue
            .enqueue(&ExpiryRecord::new(task.id(), task.responsibility()))
            .await?;
        self.coordinator
            .notify(event_context(NotificationKind::Expired, &task))
            .await;
        self.scheduler.unschedule(task.id()).await?;
        tracing::info!(task_id = %task.id(), "task expired and queued for escalation");
        Ok(())
    }
}

/// Builds the notification context for a scheduler event on a task.
fn event_context(kind: NotificationKind, task: &Task) -> NotificationContext {
    let mut context = NotificationContext::new(
        kind,
        task.id().to_string(),
        task.title(),
        task.responsibility(),
    )
    .with_description(task.description());
    if let Some(deadline) = task.deadline() {
        context = context.with_deadline(deadline);
    }
    context
}
