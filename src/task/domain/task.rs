//! Task aggregate root and lifecycle status machine.

use super::{ParseTaskStatusError, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored task lifecycle status.
///
/// `reopened` is accepted on the wire as a transient input event (see
/// [`RequestedStatus`]) but is never stored; the persisted value after a
/// reopen is [`TaskStatus::Open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work is outstanding; triggers may be armed against a deadline.
    Open,
    /// The assignee or an administrator marked the task done.
    Completed,
    /// The final deadline trigger fired while the task was still open.
    Expired,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Expired => "expired",
        }
    }

    /// Returns true for statuses that must hold no armed triggers.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Expired)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "completed" => Ok(Self::Completed),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status value carried by an edit payload.
///
/// Edit requests never write a status directly; they request one of the
/// two transitions the state machine exposes to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedStatus {
    /// Mark the task completed.
    Completed,
    /// Reopen a completed or expired task.
    Reopened,
}

impl TryFrom<&str> for RequestedStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "completed" => Ok(Self::Completed),
            "reopened" => Ok(Self::Reopened),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated field set for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    comment: String,
    responsibility: String,
    deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the required title and assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] or
    /// [`TaskDomainError::EmptyResponsibility`] when either value is blank
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        responsibility: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: non_blank(title.into(), TaskDomainError::EmptyTitle)?,
            description: String::new(),
            comment: String::new(),
            responsibility: non_blank(responsibility.into(), TaskDomainError::EmptyResponsibility)?,
            deadline: None,
        })
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

    /// Returns the deadline carried by the draft, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    comment: String,
    responsibility: String,
    deadline: Option<DateTime<Utc>>,
    status: TaskStatus,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted free-text comment.
    pub comment: String,
    /// Persisted assignee identity.
    pub responsibility: String,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a newly assigned task in the open status.
    #[must_use]
    pub fn assigned(draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            comment: draft.comment,
            responsibility: draft.responsibility,
            deadline: draft.deadline,
            status: TaskStatus::Open,
            completed_at: None,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            comment: data.comment,
            responsibility: data.responsibility,
            deadline: data.deadline,
            status: data.status,
            completed_at: data.completed_at,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the free-text comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the assignee identity.
    #[must_use]
    pub fn responsibility(&self) -> &str {
        &self.responsibility
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completion timestamp, if completed since the last reopen.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Marks an open task completed and records the completion instant.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// not open.
    pub fn complete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.guard_transition(TaskStatus::Open, TaskStatus::Completed)?;
        self.status = TaskStatus::Completed;
        self.completed_at = Some(clock.utc());
        Ok(())
    }

    /// Reopens a completed or expired task and clears the completion mark.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// already open.
    pub fn reopen(&mut self) -> Result<(), TaskDomainError> {
        if !self.status.is_terminal() {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to: TaskStatus::Open,
            });
        }
        self.status = TaskStatus::Open;
        self.completed_at = None;
        Ok(())
    }

    /// Expires an open task whose final deadline trigger fired.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the task is
    /// not open.
    pub fn expire(&mut self) -> Result<(), TaskDomainError> {
        self.guard_transition(TaskStatus::Open, TaskStatus::Expired)?;
        self.status = TaskStatus::Expired;
        Ok(())
    }

    /// Replaces the deadline.
    ///
    /// Validation against the clock and safety margin is the scheduler's
    /// concern; the domain records the accepted instant.
    pub const fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.deadline = Some(deadline);
    }

    /// Reassigns the task to a new responsible identity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyResponsibility`] when the identity is
    /// blank after trimming.
    pub fn reassign(&mut self, responsibility: impl Into<String>) -> Result<(), TaskDomainError> {
        self.responsibility =
            non_blank(responsibility.into(), TaskDomainError::EmptyResponsibility)?;
        Ok(())
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank after
    /// trimming.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), TaskDomainError> {
        self.title = non_blank(title.into(), TaskDomainError::EmptyTitle)?;
        Ok(())
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the free-text comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    fn guard_transition(
        &self,
        expected: TaskStatus,
        to: TaskStatus,
    ) -> Result<(), TaskDomainError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id,
                from: self.status,
                to,
            })
        }
    }
}

/// Returns the value unless it is blank after trimming.
fn non_blank(value: String, blank_error: TaskDomainError) -> Result<String, TaskDomainError> {
    if value.trim().is_empty() {
        return Err(blank_error);
    }
    Ok(value)
}
