//! In-memory integration tests for the todo use cases.

use super::helpers::{Fixture, fixture, start};
use chrono::Duration;
use rstest::rstest;
use todo_core::todo::{
    domain::TodoEventKind,
    services::{CreateTodoRequest, ListTodosRequest, TodoServiceError, UpdateTodoRequest},
};

fn published_types(fixture: &Fixture) -> Result<Vec<&'static str>, eyre::Report> {
    Ok(fixture
        .dispatcher
        .published()?
        .iter()
        .map(|event| event.event_type())
        .collect())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_publishes_events_in_order(fixture: Fixture) -> Result<(), eyre::Report> {
    let created = fixture
        .service
        .create(
            CreateTodoRequest::new("Write report")
                .with_description("Quarterly numbers")
                .with_priority("high")
                .with_due_date(start() + Duration::days(3)),
        )
        .await?;
    fixture.clock.advance(Duration::hours(1));

    fixture
        .service
        .update(&created.id, UpdateTodoRequest::new().with_status("in_progress"))
        .await?;
    fixture.clock.advance(Duration::hours(1));
    let completed = fixture.service.complete(&created.id).await?;
    let reopened = fixture.service.reopen(&created.id).await?;
    fixture.service.delete(&created.id).await?;

    eyre::ensure!(completed.completed_at == Some(start() + Duration::hours(2)));
    eyre::ensure!(reopened.completed_at.is_none());
    eyre::ensure!(reopened.updated_at >= reopened.created_at);
    eyre::ensure!(
        published_types(&fixture)?
            == vec![
                "TodoCreated",
                "TodoUpdated",
                "TodoCompleted",
                "TodoReopened",
                "TodoDeleted"
            ]
    );
    eyre::ensure!(fixture.repository.is_empty()?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn responses_serialise_with_canonical_strings(fixture: Fixture) -> Result<(), eyre::Report> {
    let created = fixture
        .service
        .create(CreateTodoRequest::new("Serialise me").with_priority("URGENT"))
        .await?;

    let value = serde_json::to_value(&created)?;

    eyre::ensure!(value["status"] == "pending");
    eyre::ensure!(value["priority"] == "urgent");
    eyre::ensure!(value["due_date"].is_null());
    eyre::ensure!(value["completed_at"].is_null());
    eyre::ensure!(value["is_overdue"] == false);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_failure_leaves_change_stored(fixture: Fixture) -> Result<(), eyre::Report> {
    let created = fixture.service.create(CreateTodoRequest::new("Flaky")).await?;
    fixture.dispatcher.set_failing(true);

    let result = fixture.service.complete(&created.id).await;

    let Err(err) = result else {
        eyre::bail!("dispatch failure should surface");
    };
    eyre::ensure!(matches!(err, TodoServiceError::Infrastructure { .. }));
    eyre::ensure!(err.is_possibly_applied());

    fixture.dispatcher.set_failing(false);
    let stored = fixture.service.get(&created.id).await?;
    eyre::ensure!(stored.status == "completed");
    eyre::ensure!(
        fixture
            .dispatcher
            .published()?
            .iter()
            .all(|event| event.kind() == TodoEventKind::Created)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_pages_through_todos_newest_first(fixture: Fixture) -> Result<(), eyre::Report> {
    for index in 1..=5 {
        fixture
            .service
            .create(CreateTodoRequest::new(format!("Todo {index}")))
            .await?;
        fixture.clock.advance(Duration::minutes(1));
    }

    let first = fixture
        .service
        .list(ListTodosRequest::new().with_limit(2))
        .await?;
    let second = fixture
        .service
        .list(ListTodosRequest::new().with_limit(2).with_offset(2))
        .await?;

    let titles = |page: &todo_core::todo::services::TodoPage| -> Vec<String> {
        page.todos.iter().map(|todo| todo.title.clone()).collect()
    };
    eyre::ensure!(titles(&first) == vec!["Todo 5", "Todo 4"]);
    eyre::ensure!(titles(&second) == vec!["Todo 3", "Todo 2"]);
    eyre::ensure!(second.total_count == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status(fixture: Fixture) -> Result<(), eyre::Report> {
    let done = fixture.service.create(CreateTodoRequest::new("Done")).await?;
    fixture.service.create(CreateTodoRequest::new("Open")).await?;
    fixture.service.complete(&done.id).await?;

    let completed = fixture
        .service
        .list(ListTodosRequest::new().with_status("completed"))
        .await?;

    eyre::ensure!(completed.total_count == 1);
    eyre::ensure!(completed.todos.first().map(|todo| todo.id.as_str()) == Some(done.id.as_str()));
    Ok(())
}
