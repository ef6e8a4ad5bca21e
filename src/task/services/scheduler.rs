//! Deadline scheduler: translate a task deadline into two named,
//! idempotent future triggers.

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use std::sync::Arc;

use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TriggerNames},
    ports::{TriggerHandler, TriggerPayload, TriggerRegistry, TriggerRegistryResult},
};

/// Scheduler timing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    warning_lead: Duration,
    minimum_margin: Duration,
}

impl SchedulerConfig {
    /// Creates a configuration with explicit lead and margin.
    #[must_use]
    pub const fn new(warning_lead: Duration, minimum_margin: Duration) -> Self {
        Self {
            warning_lead,
            minimum_margin,
        }
    }

    /// Returns how far ahead of the deadline the warning fires.
    #[must_use]
    pub const fn warning_lead(&self) -> Duration {
        self.warning_lead
    }

    /// Returns the minimum distance a new deadline must keep from now.
    #[must_use]
    pub const fn minimum_margin(&self) -> Duration {
        self.minimum_margin
    }
}

impl Default for SchedulerConfig {
    /// One hour of warning lead, two minutes of safety margin.
    fn default() -> Self {
        Self {
            warning_lead: Duration::hours(1),
            minimum_margin: Duration::minutes(2),
        }
    }
}

/// The fire instants computed for a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSchedule {
    /// Warning fire instant; absent when the lead window has already passed.
    pub warning_at: Option<DateTime<Utc>>,
    /// Final fire instant, exactly the deadline.
    pub final_at: DateTime<Utc>,
}

/// Arms, re-arms, and cancels the deadline triggers for tasks.
///
/// Trigger names derive deterministically from the task id, so arming
/// always cancels the previous registration under the same name first.
/// The registry is never assumed empty; cancellation tolerates names that
/// were never armed.
pub struct DeadlineScheduler<R, C>
where
    R: TriggerRegistry,
    C: Clock + Send + Sync,
{
    registry: Arc<R>,
    clock: Arc<C>,
    config: SchedulerConfig,
}

impl<R, C> Clone for DeadlineScheduler<R, C>
where
    R: TriggerRegistry,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            clock: Arc::clone(&self.clock),
            config: self.config.clone(),
        }
    }
}

impl<R, C> DeadlineScheduler<R, C>
where
    R: TriggerRegistry,
    C: Clock + Send + Sync,
{
    /// Creates a scheduler over the given registry.
    #[must_use]
    pub const fn new(registry: Arc<R>, clock: Arc<C>, config: SchedulerConfig) -> Self {
        Self {
            registry,
            clock,
            config,
        }
    }

    /// Returns the scheduler configuration.
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Validates a deadline supplied by a write request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DeadlineTooSoon`] when the deadline is in
    /// the past or closer than the minimum safety margin.
    pub fn validate_deadline(&self, deadline: DateTime<Utc>) -> Result<(), TaskDomainError> {
        let earliest = self.clock.utc() + self.config.minimum_margin;
        if deadline < earliest {
            return Err(TaskDomainError::DeadlineTooSoon { deadline, earliest });
        }
        Ok(())
    }

    /// Computes the fire instants for a deadline.
    ///
    /// The warning instant is omitted when `deadline - warning_lead` is not
    /// strictly in the future; only the final trigger is armed then.
    #[must_use]
    pub fn fire_times(&self, deadline: DateTime<Utc>) -> TriggerSchedule {
        let warning_at = deadline - self.config.warning_lead;
        TriggerSchedule {
            warning_at: (warning_at > self.clock.utc()).then_some(warning_at),
            final_at: deadline,
        }
    }

    /// Arms the warning and final triggers for a task's deadline.
    ///
    /// A task without a deadline, or whose stored deadline is no longer in
    /// the future, arms nothing. Each registration cancels any prior one
    /// under the same name first, so arming is idempotent per task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TriggerRegistryError`] when the
    /// registry rejects a cancel or arm call.
    pub async fn schedule(&self, task: &Task) -> TriggerRegistryResult<()> {
        let Some(deadline) = task.deadline() else {
            return Ok(());
        };
        if deadline <= self.clock.utc() {
            return Ok(());
        }

        let names = TriggerNames::for_task(task.id());
        let payload = TriggerPayload::new(task.id(), task.responsibility());
        let schedule = self.fire_times(deadline);

        if let Some(warning_at) = schedule.warning_at {
            self.registry.cancel(names.warning()).await?;
            self.registry
                .arm(
                    names.warning(),
                    warning_at,
                    payload.clone(),
                    TriggerHandler::Warning,
                )
                .await?;
        }

        self.registry.cancel(names.final_deadline()).await?;
        self.registry
            .arm(
                names.final_deadline(),
                schedule.final_at,
                payload,
                TriggerHandler::Final,
            )
            .await?;

        tracing::debug!(
            task_id = %task.id(),
            deadline = %deadline,
            warning = schedule.warning_at.is_some(),
            "armed deadline triggers"
        );
        Ok(())
    }

    /// Arms a fresh final trigger at the task's deadline.
    ///
    /// Used by the warning handler; cancels any prior final registration
    /// first. A task without a deadline arms nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TriggerRegistryError`] when the
    /// registry rejects a cancel or arm call.
    pub async fn arm_final(&self, task: &Task) -> TriggerRegistryResult<()> {
        let Some(deadline) = task.deadline() else {
            return Ok(());
        };
        let names = TriggerNames::for_task(task.id());
        let payload = TriggerPayload::new(task.id(), task.responsibility());
        self.registry.cancel(names.final_deadline()).await?;
        self.registry
            .arm(names.final_deadline(), deadline, payload, TriggerHandler::Final)
            .await
    }

    /// Cancels both trigger registrations for a task.
    ///
    /// Safe to call for tasks that never had a deadline.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TriggerRegistryError`] when the
    /// registry rejects a cancel call.
    pub async fn unschedule(&self, task_id: TaskId) -> TriggerRegistryResult<()> {
        let names = TriggerNames::for_task(task_id);
        self.registry.cancel(names.warning()).await?;
        self.registry.cancel(names.final_deadline()).await
    }

    /// Cancels the warning trigger registration for a task.
    ///
    /// # Errors
    ///
    /// Returns [`crate::task::ports::TriggerRegistryError`] when the
    /// registry rejects the cancel call.
    pub async fn cancel_warning(&self, task_id: TaskId) -> TriggerRegistryResult<()> {
        let names = TriggerNames::for_task(task_id);
        self.registry.cancel(names.warning()).await
    }
}
