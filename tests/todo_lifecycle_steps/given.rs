//! Given steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todo_core::todo::services::CreateTodoRequest;

#[given("an empty todo service")]
fn empty_todo_service(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.repository.is_empty()?, "repository should start empty");
    Ok(())
}

#[given(r#"a todo titled "{title}" exists"#)]
fn todo_exists(world: &mut TodoLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTodoRequest::new(title)))
        .wrap_err("create todo for scenario setup")?;
    world.current_todo = Some(created);
    Ok(())
}

#[given("the todo has been completed")]
fn todo_has_been_completed(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.current_id()?;
    let completed =
        run_async(world.service.complete(&id)).wrap_err("complete todo for scenario setup")?;
    world.current_todo = Some(completed);
    Ok(())
}
