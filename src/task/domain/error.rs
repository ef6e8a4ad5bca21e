//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The caller's claims carry no verified identity.
    #[error("caller claims carry no verified identity")]
    MissingIdentity,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The assignee identity is empty after trimming.
    #[error("task responsibility must not be empty")]
    EmptyResponsibility,

    /// The requested status change is not permitted from the current status.
    #[error("task {task_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Task whose transition was rejected.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status the caller requested.
        to: TaskStatus,
    },

    /// The deadline is in the past or inside the minimum safety margin.
    #[error("deadline {deadline} must be no earlier than {earliest}")]
    DeadlineTooSoon {
        /// The rejected deadline.
        deadline: DateTime<Utc>,
        /// Earliest deadline the scheduler accepts.
        earliest: DateTime<Utc>,
    },
}

/// Error returned while parsing status values from persistence or payloads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
