//! Workflow orchestrator port for downstream expiry handling.

use crate::task::domain::TaskId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow orchestrator operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Input handed to the downstream workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInput {
    /// Task the workflow handles.
    #[serde(rename = "taskId")]
    pub task_id: TaskId,
}

impl WorkflowInput {
    /// Creates a workflow input.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self { task_id }
    }
}

/// Contract over the external workflow orchestrator.
#[async_trait]
pub trait WorkflowOrchestrator: Send + Sync {
    /// Starts (or idempotently re-starts) a workflow execution keyed by the
    /// task id.
    async fn start(&self, workflow_key: TaskId, input: &WorkflowInput) -> WorkflowResult<()>;
}

/// Errors returned by workflow orchestrator implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// Backend orchestrator failure.
    #[error("workflow orchestrator error: {0}")]
    Orchestrator(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowError {
    /// Wraps a backend error.
    pub fn orchestrator(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Orchestrator(Arc::new(err))
    }
}
