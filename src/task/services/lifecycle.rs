//! Task lifecycle orchestration: assignment, edits, deletion, listing.

use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

use crate::notify::{
    domain::{NotificationContext, NotificationKind},
    ports::NotificationDispatcher,
    services::NotificationCoordinator,
};
use crate::task::{
    domain::{Claims, RequestedStatus, Task, TaskDomainError, TaskDraft, TaskId, TaskStatus},
    ports::{ScanPage, ScanQuery, TaskStore, TriggerRegistry},
    services::{DeadlineScheduler, TaskServiceError, TaskServiceResult},
};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignTaskRequest {
    title: String,
    responsibility: String,
    description: String,
    comment: String,
    deadline: Option<DateTime<Utc>>,
}

impl AssignTaskRequest {
    /// Creates a request with the required title and assignee.
    #[must_use]
    pub fn new(title: impl Into<String>, responsibility: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            responsibility: responsibility.into(),
            description: String::new(),
            comment: String::new(),
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the free-text comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the task deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Partial field map for an edit request.
///
/// Absent fields are left untouched. Which present fields apply depends on
/// the caller's privilege (see [`TaskLifecycleService::edit`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTaskRequest {
    task_id: TaskId,
    title: Option<String>,
    description: Option<String>,
    comment: Option<String>,
    responsibility: Option<String>,
    deadline: Option<DateTime<Utc>>,
    status: Option<RequestedStatus>,
}

impl EditTaskRequest {
    /// Creates an empty edit for a task.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
            comment: None,
            responsibility: None,
            deadline: None,
            status: None,
        }
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new free-text comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Requests reassignment to a new responsible identity.
    #[must_use]
    pub fn with_responsibility(mut self, responsibility: impl Into<String>) -> Self {
        self.responsibility = Some(responsibility.into());
        self
    }

    /// Requests a new deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Requests a status transition.
    #[must_use]
    pub const fn with_status(mut self, status: RequestedStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Drops every field a non-privileged assignee may not write.
    ///
    /// Assignees may only complete the task and update the comment; all
    /// other fields are ignored silently rather than rejected.
    fn restricted_to_assignee(self) -> Self {
        Self {
            task_id: self.task_id,
            title: None,
            description: None,
            comment: self.comment,
            responsibility: None,
            deadline: None,
            status: self
                .status
                .filter(|status| *status == RequestedStatus::Completed),
        }
    }
}

/// Task lifecycle orchestration service.
///
/// Each request is handled statelessly: the store is the single source of
/// truth, every edit is a full read-modify-write, and the last writer
/// wins. Trigger-registry failures during an edit are fatal to that edit;
/// notification failures never are.
#[derive(Clone)]
pub struct TaskLifecycleService<S, R, D, C>
where
    S: TaskStore,
    R: TriggerRegistry,
    D: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    scheduler: DeadlineScheduler<R, C>,
    coordinator: NotificationCoordinator<D>,
    clock: Arc<C>,
}

impl<S, R, D, C> TaskLifecycleService<S, R, D, C>
where
    S: TaskStore,
    R: TriggerRegistry,
    D: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        scheduler: DeadlineScheduler<R, C>,
        coordinator: NotificationCoordinator<D>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            scheduler,
            coordinator,
            clock,
        }
    }

    /// Creates a task, arms its deadline triggers, and notifies the
    /// assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a verified
    /// identity, [`TaskServiceError::Validation`] for a blank title or
    /// assignee or a deadline inside the safety margin, and dependency
    /// errors when the store or trigger registry fail.
    pub async fn assign(
        &self,
        claims: Claims,
        request: AssignTaskRequest,
    ) -> TaskServiceResult<Task> {
        let actor = claims
            .resolve()
            .map_err(|_| TaskServiceError::Unauthorized)?;

        let mut draft = TaskDraft::new(request.title, request.responsibility)?
            .with_description(request.description)
            .with_comment(request.comment);
        if let Some(deadline) = request.deadline {
            self.scheduler.validate_deadline(deadline)?;
            draft = draft.with_deadline(deadline);
        }

        let task = Task::assigned(draft, &*self.clock);
        self.store.put(&task).await?;
        self.scheduler.schedule(&task).await?;

        self.coordinator
            .notify(
                event_context(NotificationKind::Assignment, &task)
                    .with_actor(actor.identity()),
            )
            .await;

        tracing::info!(task_id = %task.id(), responsibility = task.responsibility(), "task assigned");
        Ok(task)
    }

    /// Applies an edit payload to a task.
    ///
    /// Transition aspects are evaluated in a fixed order (deadline change,
    /// reassignment, reopen, completion), then the generic field merge
    /// runs and the record is persisted once. The payload is validated in
    /// full before any effect runs, so taxonomy errors leave no partial
    /// state behind.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a verified
    /// identity, [`TaskServiceError::NotFound`] for a missing task,
    /// [`TaskServiceError::Forbidden`] when a non-privileged caller is not
    /// the assignee, [`TaskServiceError::Validation`] for rejected values
    /// or transitions, and dependency errors when the store or trigger
    /// registry fail.
    pub async fn edit(&self, claims: Claims, request: EditTaskRequest) -> TaskServiceResult<Task> {
        let actor = claims
            .resolve()
            .map_err(|_| TaskServiceError::Unauthorized)?;

        let mut task = self
            .store
            .get(request.task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(request.task_id))?;

        if !actor.may_act_on(&task) {
            tracing::warn!(
                task_id = %task.id(),
                caller = actor.identity(),
                "edit rejected: caller is not the assignee"
            );
            return Err(TaskServiceError::Forbidden(actor.identity().to_owned()));
        }

        let payload = if actor.is_privileged() {
            request
        } else {
            request.restricted_to_assignee()
        };

        self.validate_edit(&task, &payload)?;

        // Deadline change: cancel, record, re-arm while open.
        if let Some(deadline) = payload.deadline {
            self.scheduler.unschedule(task.id()).await?;
            task.set_deadline(deadline);
            if task.status() == TaskStatus::Open {
                self.scheduler.schedule(&task).await?;
            }
        }

        // Reassignment: the notification target changes, so the armed
        // triggers are replaced against the unchanged deadline.
        if let Some(responsibility) = payload.responsibility {
            if responsibility != task.responsibility() {
                self.scheduler.unschedule(task.id()).await?;
                task.reassign(responsibility)?;
                self.coordinator
                    .notify(
                        event_context(NotificationKind::Reassignment, &task)
                            .with_actor(actor.identity()),
                    )
                    .await;
                if task.status() == TaskStatus::Open {
                    self.scheduler.schedule(&task).await?;
                }
            }
        }

        // Reopen: back to open, completion mark cleared, triggers re-armed
        // when a future deadline remains.
        if payload.status == Some(RequestedStatus::Reopened) {
            task.reopen()?;
            self.coordinator
                .notify(
                    event_context(NotificationKind::Reopened, &task)
                        .with_actor(actor.identity()),
                )
                .await;
            self.scheduler.schedule(&task).await?;
            tracing::info!(task_id = %task.id(), "task reopened");
        }

        // Completion: terminal status, triggers canceled.
        if payload.status == Some(RequestedStatus::Completed) {
            task.complete(&*self.clock)?;
            self.scheduler.unschedule(task.id()).await?;
            self.coordinator
                .notify(
                    event_context(NotificationKind::Completed, &task)
                        .with_actor(actor.identity()),
                )
                .await;
            tracing::info!(task_id = %task.id(), "task completed");
        }

        if let Some(title) = payload.title {
            task.set_title(title)?;
        }
        if let Some(description) = payload.description {
            task.set_description(description);
        }
        if let Some(comment) = payload.comment {
            task.set_comment(comment);
        }

        self.store.put(&task).await?;
        Ok(task)
    }

    /// Hard-deletes a task and cancels its trigger registrations.
    ///
    /// Available to privileged callers only; does not pass through the
    /// state machine, and deleting an absent task succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a verified
    /// identity, [`TaskServiceError::Forbidden`] for non-privileged
    /// callers, and dependency errors when the registry or store fail.
    pub async fn delete(&self, claims: Claims, task_id: TaskId) -> TaskServiceResult<()> {
        let actor = claims
            .resolve()
            .map_err(|_| TaskServiceError::Unauthorized)?;
        if !actor.is_privileged() {
            return Err(TaskServiceError::Forbidden(actor.identity().to_owned()));
        }

        self.scheduler.unschedule(task_id).await?;
        self.store.delete(task_id).await?;
        tracing::info!(%task_id, "task deleted");
        Ok(())
    }

    /// Scans all tasks; privileged callers only.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a verified
    /// identity, [`TaskServiceError::Forbidden`] for non-privileged
    /// callers, and store errors.
    pub async fn list(&self, claims: Claims, query: ScanQuery) -> TaskServiceResult<ScanPage> {
        let actor = claims
            .resolve()
            .map_err(|_| TaskServiceError::Unauthorized)?;
        if !actor.is_privileged() {
            return Err(TaskServiceError::Forbidden(actor.identity().to_owned()));
        }
        Ok(self.store.scan(&query).await?)
    }

    /// Scans the caller's own tasks.
    ///
    /// The responsibility filter is pinned to the caller identity
    /// regardless of what the query requests.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Unauthorized`] without a verified
    /// identity and store errors.
    pub async fn list_for(&self, claims: Claims, query: ScanQuery) -> TaskServiceResult<ScanPage> {
        let actor = claims
            .resolve()
            .map_err(|_| TaskServiceError::Unauthorized)?;
        let filter = query
            .filter()
            .clone()
            .with_responsibility(actor.identity());
        let scoped = query.with_filter(filter);
        Ok(self.store.scan(&scoped).await?)
    }

    /// Validates every aspect of an edit before any effect runs.
    fn validate_edit(&self, task: &Task, request: &EditTaskRequest) -> TaskServiceResult<()> {
        if let Some(deadline) = request.deadline {
            self.scheduler.validate_deadline(deadline)?;
        }
        if let Some(responsibility) = request.responsibility.as_deref() {
            if responsibility.trim().is_empty() {
                return Err(TaskDomainError::EmptyResponsibility.into());
            }
        }
        if let Some(title) = request.title.as_deref() {
            if title.trim().is_empty() {
                return Err(TaskDomainError::EmptyTitle.into());
            }
        }
        match request.status {
            Some(RequestedStatus::Reopened) if !task.status().is_terminal() => {
                Err(TaskDomainError::InvalidStatusTransition {
                    task_id: task.id(),
                    from: task.status(),
                    to: TaskStatus::Open,
                }
                .into())
            }
            Some(RequestedStatus::Completed) if task.status() != TaskStatus::Open => {
                Err(TaskDomainError::InvalidStatusTransition {
                    task_id: task.id(),
                    from: task.status(),
                    to: TaskStatus::Completed,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

/// Builds the notification context for a lifecycle event on a task.
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
