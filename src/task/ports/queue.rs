//! Queue port decoupling deadline expiry from downstream workflow start.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for expiry queue operations.
pub type ExpiryQueueResult<T> = Result<T, ExpiryQueueError>;

/// Record enqueued when a task's final trigger fires while still open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryRecord {
    /// Task that expired.
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
    /// Assignee identity at expiry time.
    pub responsibility: String,
}

impl ExpiryRecord {
    /// Creates an expiry record.
    #[must_use]
    pub fn new(task_id: TaskId, responsibility: impl Into<String>) -> Self {
        Self {
            task_id,
            responsibility: responsibility.into(),
        }
    }
}

/// Producer contract over the external expiry queue.
///
/// Consumption and redelivery are the queue substrate's concern; the
/// processor is invoked with records by that substrate, at least once.
#[async_trait]
pub trait ExpiryQueue: Send + Sync {
    /// Enqueues an expiry record for asynchronous processing.
    async fn enqueue(&self, record: &ExpiryRecord) -> ExpiryQueueResult<()>;
}

/// Errors returned by expiry queue implementations.
#[derive(Debug, Clone, Error)]
pub enum ExpiryQueueError {
    /// Backend queue failure.
    #[error("expiry queue error: {0}")]
    Queue(Arc<dyn std::error::Error + Send + Sync>),
}

impl ExpiryQueueError {
    /// Wraps a backend error.
    pub fn queue(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Queue(Arc::new(err))
    }
}
