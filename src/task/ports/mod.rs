//! Port contracts for external collaborators of the task engine.

pub mod queue;
pub mod store;
pub mod trigger;
pub mod workflow;

pub use queue::{ExpiryQueue, ExpiryQueueError, ExpiryQueueResult, ExpiryRecord};
pub use store::{
    ScanFilter, ScanPage, ScanQuery, SortKey, TaskStore, TaskStoreError, TaskStoreResult,
};
pub use trigger::{
    TriggerHandler, TriggerPayload, TriggerRegistry, TriggerRegistryError, TriggerRegistryResult,
};
pub use workflow::{WorkflowError, WorkflowInput, WorkflowOrchestrator, WorkflowResult};
