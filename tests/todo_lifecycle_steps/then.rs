//! Then steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use todo_core::todo::{
    domain::{Priority, TodoId},
    ports::TodoRepository,
    services::{TodoResponse, TodoServiceError},
};

fn current_todo(world: &TodoLifecycleWorld) -> Result<&TodoResponse, eyre::Report> {
    world
        .current_todo
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing current todo"))
}

fn last_error(world: &TodoLifecycleWorld) -> Result<&TodoServiceError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(todo)) => Err(eyre::eyre!("expected a failure, got {todo:?}")),
        None => Err(eyre::eyre!("missing request result")),
    }
}

#[then(r#"the todo status is "{status}""#)]
fn todo_status_is(world: &TodoLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let todo = current_todo(world)?;
    eyre::ensure!(
        todo.status == status,
        "expected status {status}, found {}",
        todo.status
    );
    Ok(())
}

#[then(r#"the todo priority is "{priority}""#)]
fn todo_priority_is(world: &TodoLifecycleWorld, priority: String) -> Result<(), eyre::Report> {
    let todo = current_todo(world)?;
    eyre::ensure!(
        todo.priority == priority,
        "expected priority {priority}, found {}",
        todo.priority
    );
    Ok(())
}

#[then("the todo has no completion time")]
fn todo_has_no_completion_time(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let todo = current_todo(world)?;
    eyre::ensure!(
        todo.completed_at.is_none(),
        "expected no completion time, found {:?}",
        todo.completed_at
    );
    Ok(())
}

#[then(r#"the published event types are "{types}""#)]
fn published_event_types_are(world: &TodoLifecycleWorld, types: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = types.split(',').map(str::trim).collect();
    let published = world.dispatcher.published()?;
    let actual: Vec<&str> = published.iter().map(|event| event.event_type()).collect();
    eyre::ensure!(
        actual == expected,
        "expected events {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("no events are published")]
fn no_events_published(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let published = world.dispatcher.published()?;
    eyre::ensure!(published.is_empty(), "expected no events, found {published:?}");
    Ok(())
}

#[then("no todos are stored")]
fn no_todos_stored(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.repository.is_empty()?, "expected an empty repository");
    Ok(())
}

#[then("the request fails with an invalid input error")]
fn fails_with_invalid_input(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TodoServiceError::InvalidInput(_)),
        "expected InvalidInput error, got {err:?}"
    );
    Ok(())
}

#[then("the request fails with a not found error")]
fn fails_with_not_found(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TodoServiceError::NotFound(_)),
        "expected NotFound error, got {err:?}"
    );
    Ok(())
}

#[then("the request fails with a business rule error")]
fn fails_with_business_rule(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TodoServiceError::BusinessRule(_)),
        "expected BusinessRule error, got {err:?}"
    );
    Ok(())
}

#[then(r#"the stored todo priority is "{priority}""#)]
fn stored_priority_is(world: &TodoLifecycleWorld, priority: String) -> Result<(), eyre::Report> {
    let expected = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid expected priority in scenario: {err}"))?;
    let id = TodoId::parse(&current_todo(world)?.id)?;
    let stored = run_async(world.repository.find_by_id(id))?
        .ok_or_else(|| eyre::eyre!("todo {id} should be stored"))?;
    eyre::ensure!(
        stored.priority() == expected,
        "expected stored priority {expected}, found {}",
        stored.priority()
    );
    Ok(())
}
