//! Given steps for task deadline BDD scenarios.

use super::world::{TaskDeadlineWorld, run_async};
use chrono::{Duration, Utc};
use eyre::WrapErr;
use remit::task::{
    domain::{Claims, RequestedStatus},
    services::{AssignTaskRequest, EditTaskRequest},
};
use rstest_bdd_macros::given;

fn admin_claims(identity: &str) -> Claims {
    Claims::verified(identity).in_group("admin")
}

#[given(r#"an admin "{admin}" has assigned "{title}" to "{assignee}" due in 2 hours"#)]
fn assigned_with_deadline(
    world: &mut TaskDeadlineWorld,
    admin: String,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let request = AssignTaskRequest::new(title, assignee)
        .with_description("scenario task")
        .with_deadline(Utc::now() + Duration::hours(2));
    let task = run_async(world.service.assign(admin_claims(&admin), request))
        .wrap_err("assign task with deadline in scenario setup")?;
    world.admin = Some(admin);
    world.task = Some(task);
    Ok(())
}

#[given(r#"an admin "{admin}" has assigned "{title}" to "{assignee}" with no deadline"#)]
fn assigned_without_deadline(
    world: &mut TaskDeadlineWorld,
    admin: String,
    title: String,
    assignee: String,
) -> Result<(), eyre::Report> {
    let request = AssignTaskRequest::new(title, assignee).with_description("scenario task");
    let task = run_async(world.service.assign(admin_claims(&admin), request))
        .wrap_err("assign task without deadline in scenario setup")?;
    world.admin = Some(admin);
    world.task = Some(task);
    Ok(())
}

#[given("the assignee has completed the task")]
fn assignee_completed(world: &mut TaskDeadlineWorld) -> Result<(), eyre::Report> {
    let task = world
        .task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assigned task in scenario world"))?;

    let completed = run_async(world.service.edit(
        Claims::verified(task.responsibility()),
        EditTaskRequest::new(task.id()).with_status(RequestedStatus::Completed),
    ))
    .wrap_err("complete task in scenario setup")?;

    world.task = Some(completed);
    Ok(())
}
