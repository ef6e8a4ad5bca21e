//! In-memory workflow orchestrator adapter.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::TaskId,
    ports::{WorkflowError, WorkflowInput, WorkflowOrchestrator, WorkflowResult},
};

/// Thread-safe in-memory workflow orchestrator.
///
/// Records every start call so tests can assert exactly-once handoff per
/// still-expired task.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowOrchestrator {
    started: Arc<RwLock<Vec<(TaskId, WorkflowInput)>>>,
}

impl InMemoryWorkflowOrchestrator {
    /// Creates an orchestrator with no executions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded start calls in order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Orchestrator`] when the lock is poisoned.
    pub fn started(&self) -> WorkflowResult<Vec<(TaskId, WorkflowInput)>> {
        self.started
            .read()
            .map(|started| started.clone())
            .map_err(|err| WorkflowError::orchestrator(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl WorkflowOrchestrator for InMemoryWorkflowOrchestrator {
    async fn start(&self, workflow_key: TaskId, input: &WorkflowInput) -> WorkflowResult<()> {
        self.started
            .write()
            .map_err(|err| WorkflowError::orchestrator(std::io::Error::other(err.to_string())))?
            .push((workflow_key, input.clone()));
        Ok(())
    }
}
