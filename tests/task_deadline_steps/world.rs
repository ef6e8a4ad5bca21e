//! Shared world state for task deadline BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use remit::notify::{adapters::InMemoryDispatcher, services::NotificationCoordinator};
use remit::task::{
    adapters::memory::{InMemoryExpiryQueue, InMemoryTaskStore, InMemoryTriggerRegistry},
    domain::Task,
    services::{DeadlineScheduler, SchedulerConfig, TaskLifecycleService, TriggerHandlers},
};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<
    InMemoryTaskStore,
    InMemoryTriggerRegistry,
    InMemoryDispatcher,
    DefaultClock,
>;

/// Handler type used by the BDD world.
pub type TestTriggerHandlers = TriggerHandlers<
    InMemoryTaskStore,
    InMemoryTriggerRegistry,
    InMemoryDispatcher,
    InMemoryExpiryQueue,
    DefaultClock,
>;

/// Scenario world for deadline escalation behaviour tests.
pub struct TaskDeadlineWorld {
    pub store: Arc<InMemoryTaskStore>,
    pub registry: Arc<InMemoryTriggerRegistry>,
    pub dispatcher: Arc<InMemoryDispatcher>,
    pub queue: Arc<InMemoryExpiryQueue>,
    pub service: TestTaskService,
    pub handlers: TestTriggerHandlers,
    pub admin: Option<String>,
    pub task: Option<Task>,
}

impl TaskDeadlineWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let registry = Arc::new(InMemoryTriggerRegistry::new());
        let dispatcher = Arc::new(InMemoryDispatcher::new());
        let queue = Arc::new(InMemoryExpiryQueue::new());
        let scheduler = DeadlineScheduler::new(
            Arc::clone(&registry),
            Arc::new(DefaultClock),
            SchedulerConfig::default(),
        );
        let coordinator = NotificationCoordinator::new(Arc::clone(&dispatcher));
        let service = TaskLifecycleService::new(
            Arc::clone(&store),
            scheduler.clone(),
            coordinator.clone(),
            Arc::new(DefaultClock),
        );
        let handlers = TriggerHandlers::new(
            Arc::clone(&store),
            scheduler,
            coordinator,
            Arc::clone(&queue),
        );

        Self {
            store,
            registry,
            dispatcher,
            queue,
            service,
            handlers,
            admin: None,
            task: None,
        }
    }
}

impl Default for TaskDeadlineWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskDeadlineWorld {
    TaskDeadlineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
