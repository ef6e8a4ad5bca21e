//! Then steps for task deadline BDD scenarios.

use super::world::{TaskDeadlineWorld, run_async};
use remit::notify::domain::RECIPIENT_ATTRIBUTE;
use remit::task::{
    domain::{TaskStatus, TriggerNames},
    ports::TaskStore,
};
use rstest_bdd_macros::then;

fn published_for(
    world: &TaskDeadlineWorld,
    channel: &str,
    recipient: &str,
) -> Result<usize, eyre::Report> {
    let published = world
        .dispatcher
        .published_on(channel)
        .map_err(|err| eyre::eyre!("dispatcher state unavailable: {err}"))?;
    Ok(published
        .iter()
        .filter(|notification| {
            notification
                .attributes
                .get(RECIPIENT_ATTRIBUTE)
                .is_some_and(|value| value == recipient)
        })
        .count())
}

#[then(r#"one warning notification is published for "{recipient}""#)]
fn one_warning_published(
    world: &TaskDeadlineWorld,
    recipient: String,
) -> Result<(), eyre::Report> {
    let count = published_for(world, "warning", &recipient)?;
    if count != 1 {
        return Err(eyre::eyre!(
            "expected one warning notification for {recipient}, found {count}"
        ));
    }
    Ok(())
}

#[then("no warning notification is published")]
fn no_warning_published(world: &TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let published = world
        .dispatcher
        .published_on("warning")
        .map_err(|err| eyre::eyre!("dispatcher state unavailable: {err}"))?;
    if !published.is_empty() {
        return Err(eyre::eyre!(
            "expected no warning notifications, found {}",
            published.len()
        ));
    }
    Ok(())
}

#[then(r#"one reassignment notification is published for "{recipient}""#)]
fn one_reassignment_published(
    world: &TaskDeadlineWorld,
    recipient: String,
) -> Result<(), eyre::Report> {
    let count = published_for(world, "reassignment", &recipient)?;
    if count != 1 {
        return Err(eyre::eyre!(
            "expected one reassignment notification for {recipient}, found {count}"
        ));
    }
    Ok(())
}

#[then("the final trigger is armed at the task deadline")]
fn final_armed_at_deadline(world: &TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task"))?;
    let deadline = task
        .deadline()
        .ok_or_else(|| eyre::eyre!("scenario task has no deadline"))?;

    let names = TriggerNames::for_task(task.id());
    let armed = world
        .registry
        .armed_trigger(names.final_deadline())
        .map_err(|err| eyre::eyre!("registry state unavailable: {err}"))?
        .ok_or_else(|| eyre::eyre!("final trigger is not armed"))?;

    if armed.fire_at != deadline {
        return Err(eyre::eyre!(
            "expected final trigger at {deadline}, found {}",
            armed.fire_at
        ));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskDeadlineWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task"))?;
    let stored = run_async(world.store.get(task.id()))
        .map_err(|err| eyre::eyre!("store state unavailable: {err}"))?
        .ok_or_else(|| eyre::eyre!("task record missing from store"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("one expiry record is queued")]
fn one_expiry_record_queued(world: &TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task"))?;
    let records = world
        .queue
        .records()
        .map_err(|err| eyre::eyre!("queue state unavailable: {err}"))?;

    if records.len() != 1 {
        return Err(eyre::eyre!("expected one expiry record, found {}", records.len()));
    }
    if records.first().map(|record| record.task_id) != Some(task.id()) {
        return Err(eyre::eyre!("expiry record references the wrong task"));
    }
    Ok(())
}

#[then("no triggers remain armed")]
fn no_triggers_armed(world: &TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let armed = world
        .registry
        .armed()
        .map_err(|err| eyre::eyre!("registry state unavailable: {err}"))?;
    if !armed.is_empty() {
        return Err(eyre::eyre!("expected no armed triggers, found {}", armed.len()));
    }
    Ok(())
}

#[then(r#"the armed triggers carry responsibility "{assignee}""#)]
fn armed_triggers_carry_responsibility(
    world: &TaskDeadlineWorld,
    assignee: String,
) -> Result<(), eyre::Report> {
    let armed = world
        .registry
        .armed()
        .map_err(|err| eyre::eyre!("registry state unavailable: {err}"))?;
    if armed.is_empty() {
        return Err(eyre::eyre!("expected armed triggers, found none"));
    }
    for trigger in armed {
        if trigger.payload.responsibility != assignee {
            return Err(eyre::eyre!(
                "trigger {} targets {}, expected {assignee}",
                trigger.name,
                trigger.payload.responsibility
            ));
        }
    }
    Ok(())
}
