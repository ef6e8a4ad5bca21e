//! Orchestration services for the task engine.

mod error;
mod expiry;
mod handlers;
mod lifecycle;
mod scheduler;

pub use error::{ErrorKind, TaskServiceError, TaskServiceResult};
pub use expiry::ExpiryProcessor;
pub use handlers::TriggerHandlers;
pub use lifecycle::{AssignTaskRequest, EditTaskRequest, TaskLifecycleService};
pub use scheduler::{DeadlineScheduler, SchedulerConfig, TriggerSchedule};
