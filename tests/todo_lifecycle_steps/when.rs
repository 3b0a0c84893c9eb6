//! When steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use rstest_bdd_macros::when;
use todo_core::todo::{
    domain::TodoId,
    services::{CreateTodoRequest, UpdateTodoRequest},
};

#[when(r#"a todo titled "{title}" is created with priority "{priority}""#)]
fn create_with_priority(world: &mut TodoLifecycleWorld, title: String, priority: String) {
    let request = CreateTodoRequest::new(title).with_priority(priority);
    let result = run_async(world.service.create(request));
    world.record(result);
}

#[when("a todo with an empty title is created")]
fn create_with_empty_title(world: &mut TodoLifecycleWorld) {
    let result = run_async(world.service.create(CreateTodoRequest::new("")));
    world.record(result);
}

#[when("an unknown todo is completed")]
fn complete_unknown(world: &mut TodoLifecycleWorld) {
    let id = TodoId::new().to_string();
    let result = run_async(world.service.complete(&id));
    world.record(result);
}

#[when("the todo is completed")]
fn complete_current(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let result = run_async(world.service.complete(&id));
    world.record(result);
    Ok(())
}

#[when("the todo is reopened")]
fn reopen_current(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let result = run_async(world.service.reopen(&id));
    world.record(result);
    Ok(())
}

#[when(r#"the todo priority is changed to "{priority}""#)]
fn change_priority(world: &mut TodoLifecycleWorld, priority: String) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let request = UpdateTodoRequest::new().with_priority(priority);
    let result = run_async(world.service.update(&id, request));
    world.record(result);
    Ok(())
}
