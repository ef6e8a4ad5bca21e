//! Tests for deadline validation, fire-time computation, and idempotent
//! trigger arming.

use super::support::FrozenClock;
use crate::task::{
    adapters::memory::{InMemoryTriggerRegistry, TriggerCall},
    domain::{PersistedTaskData, Task, TaskDomainError, TaskDraft, TaskId, TaskStatus, TriggerNames},
    ports::TriggerHandler,
    services::{DeadlineScheduler, SchedulerConfig},
};
use chrono::Duration;
use rstest::{fixture, rstest};
use std::sync::Arc;

struct Harness {
    registry: Arc<InMemoryTriggerRegistry>,
    clock: FrozenClock,
    scheduler: DeadlineScheduler<InMemoryTriggerRegistry, FrozenClock>,
}

#[fixture]
fn harness() -> Harness {
    let clock = FrozenClock::base();
    let registry = Arc::new(InMemoryTriggerRegistry::new());
    let scheduler = DeadlineScheduler::new(
        Arc::clone(&registry),
        Arc::new(clock),
        SchedulerConfig::default(),
    );
    Harness {
        registry,
        clock,
        scheduler,
    }
}

fn task_due_in(clock: &FrozenClock, hours: i64) -> Task {
    let draft = TaskDraft::new("Rotate credentials", "alice@example.com")
        .expect("valid draft")
        .with_deadline(clock.0 + Duration::hours(hours));
    Task::assigned(draft, clock)
}

fn task_without_deadline(clock: &FrozenClock) -> Task {
    let draft =
        TaskDraft::new("Write retro notes", "alice@example.com").expect("valid draft");
    Task::assigned(draft, clock)
}

#[rstest]
fn fire_times_place_warning_one_lead_ahead(harness: Harness) {
    let deadline = harness.clock.0 + Duration::hours(2);

    let schedule = harness.scheduler.fire_times(deadline);

    assert_eq!(schedule.warning_at, Some(deadline - Duration::hours(1)));
    assert_eq!(schedule.final_at, deadline);
}

#[rstest]
fn fire_times_skip_warning_inside_lead_window(harness: Harness) {
    let deadline = harness.clock.0 + Duration::minutes(30);

    let schedule = harness.scheduler.fire_times(deadline);

    assert_eq!(schedule.warning_at, None);
    assert_eq!(schedule.final_at, deadline);
}

#[rstest]
fn validate_rejects_past_deadline(harness: Harness) {
    let result = harness
        .scheduler
        .validate_deadline(harness.clock.0 - Duration::hours(1));
    assert!(matches!(result, Err(TaskDomainError::DeadlineTooSoon { .. })));
}

#[rstest]
fn validate_rejects_deadline_inside_safety_margin(harness: Harness) {
    let result = harness
        .scheduler
        .validate_deadline(harness.clock.0 + Duration::seconds(90));
    assert!(matches!(result, Err(TaskDomainError::DeadlineTooSoon { .. })));
}

#[rstest]
fn validate_accepts_deadline_on_the_margin(harness: Harness) {
    harness
        .scheduler
        .validate_deadline(harness.clock.0 + Duration::minutes(2))
        .expect("margin boundary accepted");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_arms_both_triggers(harness: Harness) {
    let task = task_due_in(&harness.clock, 2);

    harness.scheduler.schedule(&task).await.expect("schedule");

    let names = TriggerNames::for_task(task.id());
    let warning = harness
        .registry
        .armed_trigger(names.warning())
        .expect("registry")
        .expect("warning armed");
    let final_trigger = harness
        .registry
        .armed_trigger(names.final_deadline())
        .expect("registry")
        .expect("final armed");

    assert_eq!(warning.fire_at, harness.clock.0 + Duration::hours(1));
    assert_eq!(warning.handler, TriggerHandler::Warning);
    assert_eq!(warning.payload.responsibility, "alice@example.com");
    assert_eq!(final_trigger.fire_at, harness.clock.0 + Duration::hours(2));
    assert_eq!(final_trigger.handler, TriggerHandler::Final);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_twice_leaves_one_trigger_pair(harness: Harness) {
    let task = task_due_in(&harness.clock, 2);

    harness
        .scheduler
        .schedule(&task)
        .await
        .expect("first schedule");
    harness
        .scheduler
        .schedule(&task)
        .await
        .expect("second schedule");

    assert_eq!(harness.registry.armed().expect("registry").len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_cancels_before_arming(harness: Harness) {
    let task = task_due_in(&harness.clock, 2);
    let names = TriggerNames::for_task(task.id());

    harness.scheduler.schedule(&task).await.expect("schedule");

    let calls = harness.registry.calls().expect("registry");
    let final_positions: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter_map(|(index, call)| match call {
            TriggerCall::Arm { name, .. } | TriggerCall::Cancel { name, .. }
                if name == names.final_deadline() =>
            {
                Some(index)
            }
            _ => None,
        })
        .collect();

    assert_eq!(final_positions.len(), 2);
    assert!(matches!(
        calls.get(final_positions[0]),
        Some(TriggerCall::Cancel { .. })
    ));
    assert!(matches!(
        calls.get(final_positions[1]),
        Some(TriggerCall::Arm { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_without_deadline_touches_nothing(harness: Harness) {
    let task = task_without_deadline(&harness.clock);

    harness.scheduler.schedule(&task).await.expect("schedule");

    assert!(harness.registry.calls().expect("registry").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_skips_warning_inside_lead_window(harness: Harness) {
    let draft = TaskDraft::new("Rotate credentials", "alice@example.com")
        .expect("valid draft")
        .with_deadline(harness.clock.0 + Duration::minutes(30));
    let task = Task::assigned(draft, &harness.clock);

    harness.scheduler.schedule(&task).await.expect("schedule");

    let names = TriggerNames::for_task(task.id());
    assert!(
        harness
            .registry
            .armed_trigger(names.warning())
            .expect("registry")
            .is_none()
    );
    assert!(
        harness
            .registry
            .armed_trigger(names.final_deadline())
            .expect("registry")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn schedule_skips_stale_stored_deadline(harness: Harness) {
    // A row reloaded from the store whose deadline already passed.
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Rotate credentials".to_owned(),
        description: String::new(),
        comment: String::new(),
        responsibility: "alice@example.com".to_owned(),
        deadline: Some(harness.clock.0 - Duration::hours(1)),
        status: TaskStatus::Open,
        completed_at: None,
        created_at: harness.clock.0 - Duration::days(2),
    });

    harness.scheduler.schedule(&task).await.expect("schedule");

    assert!(harness.registry.calls().expect("registry").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unschedule_tolerates_never_armed_task(harness: Harness) {
    harness
        .scheduler
        .unschedule(TaskId::new())
        .await
        .expect("cancel without registrations succeeds");

    assert_eq!(harness.registry.calls().expect("registry").len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn arm_final_twice_keeps_one_registration(harness: Harness) {
    let task = task_due_in(&harness.clock, 2);

    harness
        .scheduler
        .arm_final(&task)
        .await
        .expect("first arm");
    harness
        .scheduler
        .arm_final(&task)
        .await
        .expect("second arm");

    let names = TriggerNames::for_task(task.id());
    assert_eq!(harness.registry.armed().expect("registry").len(), 1);
    assert_eq!(
        harness
            .registry
            .arm_count(names.final_deadline())
            .expect("registry"),
        2
    );
}
