//! Trigger registry port for durable future-time callbacks.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for trigger registry operations.
pub type TriggerRegistryResult<T> = Result<T, TriggerRegistryError>;

/// Handler a trigger is routed to when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerHandler {
    /// The warning entry point, fired ahead of the deadline.
    Warning,
    /// The final entry point, fired at the deadline.
    Final,
}

/// Payload delivered to a handler when its trigger fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPayload {
    /// Task the trigger belongs to.
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
    /// Assignee identity at arming time.
    pub responsibility: String,
}

impl TriggerPayload {
    /// Creates a trigger payload.
    #[must_use]
    pub fn new(task_id: TaskId, responsibility: impl Into<String>) -> Self {
        Self {
            task_id,
            responsibility: responsibility.into(),
        }
    }
}

/// Contract over the external durable trigger registry.
///
/// Registrations are keyed by name; arming an already-registered name is a
/// conflict, so callers cancel before arming. Delivery is at-least-once:
/// handlers must re-validate task state rather than trust the firing.
#[async_trait]
pub trait TriggerRegistry: Send + Sync {
    /// Registers a trigger to fire once at the given instant.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerRegistryError::AlreadyArmed`] when a registration
    /// with the same name exists, or
    /// [`TriggerRegistryError::Registry`] on backend failure.
    async fn arm(
        &self,
        name: &str,
        fire_at: DateTime<Utc>,
        payload: TriggerPayload,
        handler: TriggerHandler,
    ) -> TriggerRegistryResult<()>;

    /// Removes a trigger registration and its invocation binding.
    ///
    /// Cancelling a name that was never armed succeeds; callers must be
    /// able to cancel triggers for a task that had no deadline.
    async fn cancel(&self, name: &str) -> TriggerRegistryResult<()>;
}

/// Errors returned by trigger registry implementations.
#[derive(Debug, Clone, Error)]
pub enum TriggerRegistryError {
    /// A registration with the same name is already armed.
    #[error("trigger already armed: {0}")]
    AlreadyArmed(String),

    /// Backend registry failure.
    #[error("trigger registry error: {0}")]
    Registry(Arc<dyn std::error::Error + Send + Sync>),
}

impl TriggerRegistryError {
    /// Wraps a backend error.
    pub fn registry(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Registry(Arc::new(err))
    }
}
