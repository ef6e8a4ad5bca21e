//! When steps for task deadline BDD scenarios.

use super::world::{TaskDeadlineWorld, run_async};
use eyre::WrapErr;
use remit::task::{
    domain::{Claims, RequestedStatus},
    ports::TriggerPayload,
    services::EditTaskRequest,
};
use rstest_bdd_macros::when;

fn trigger_payload(world: &TaskDeadlineWorld) -> Result<TriggerPayload, eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task in scenario world"))?;
    Ok(TriggerPayload::new(task.id(), task.responsibility()))
}

fn admin_claims(world: &TaskDeadlineWorld) -> Result<Claims, eyre::Report> {
    let admin = world
        .admin
        .as_deref()
        .ok_or_else(|| eyre::eyre!("missing admin identity in scenario world"))?;
    Ok(Claims::verified(admin).in_group("admin"))
}

#[when("the warning trigger fires")]
fn warning_fires(world: &mut TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let payload = trigger_payload(world)?;
    run_async(world.handlers.handle_warning(&payload)).wrap_err("handle warning firing")?;
    Ok(())
}

#[when("the final trigger fires")]
fn final_fires(world: &mut TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let payload = trigger_payload(world)?;
    run_async(world.handlers.handle_final(&payload)).wrap_err("handle final firing")?;
    Ok(())
}

#[when("the admin reopens the task")]
fn admin_reopens(world: &mut TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let claims = admin_claims(world)?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task in scenario world"))?;

    let reopened = run_async(world.service.edit(
        claims,
        EditTaskRequest::new(task.id()).with_status(RequestedStatus::Reopened),
    ))
    .wrap_err("reopen task")?;

    world.task = Some(reopened);
    Ok(())
}

#[when(r#"the admin reassigns the task to "{assignee}""#)]
fn admin_reassigns(world: &mut TaskDeadlineWorld, assignee: String) -> Result<(), eyre::Report> {
    let claims = admin_claims(world)?;
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task in scenario world"))?;

    let reassigned = run_async(world.service.edit(
        claims,
        EditTaskRequest::new(task.id()).with_responsibility(assignee),
    ))
    .wrap_err("reassign task")?;

    world.task = Some(reassigned);
    Ok(())
}
