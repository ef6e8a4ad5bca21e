//! Service-level error taxonomy for task operations.

use crate::task::domain::{ParseTaskStatusError, TaskDomainError, TaskId};
use crate::task::ports::{ExpiryQueueError, TaskStoreError, TriggerRegistryError, WorkflowError};
use thiserror::Error;

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Errors surfaced by the task services.
///
/// [`TaskServiceError::kind`] collapses the variants into the
/// machine-readable taxonomy callers branch on.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// The request carried no verified identity.
    #[error("caller identity is not verified")]
    Unauthorized,

    /// The caller is authenticated but not permitted for this task or
    /// operation.
    #[error("caller {0} is not permitted for this operation")]
    Forbidden(String),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Domain validation rejected the payload.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// A status value in the payload could not be parsed.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// Reserved for optimistic-locking store writes; not currently raised.
    #[error("concurrent write conflict on task {0}")]
    Conflict(TaskId),

    /// The task store failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// The trigger registry failed.
    #[error(transparent)]
    Trigger(#[from] TriggerRegistryError),

    /// The expiry queue failed.
    #[error(transparent)]
    Queue(#[from] ExpiryQueueError),

    /// The workflow orchestrator failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl TaskServiceError {
    /// Returns the machine-readable error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(TaskDomainError::MissingIdentity) => ErrorKind::Unauthorized,
            Self::Validation(_) | Self::InvalidStatus(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Store(_) | Self::Trigger(_) | Self::Queue(_) | Self::Workflow(_) => {
                ErrorKind::DependencyFailure
            }
        }
    }
}

/// Machine-readable error taxonomy returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No verified identity.
    Unauthorized,
    /// Authenticated but not permitted.
    Forbidden,
    /// Task or dependent resource absent.
    NotFound,
    /// Malformed or rejected payload.
    Validation,
    /// Reserved for future optimistic locking.
    Conflict,
    /// An external collaborator call failed.
    DependencyFailure,
}
