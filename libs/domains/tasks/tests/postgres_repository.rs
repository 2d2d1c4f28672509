//! Repository and service tests against a real PostgreSQL container.
//!
//! Run with `cargo test -p domain_tasks -- --ignored` (requires Docker).

use std::sync::Arc;

use domain_tasks::{
    CreateTask, PgTaskRepository, STATUS_COMPLETED, STATUS_PENDING, TaskError, TaskRepository,
    TaskService,
};
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_assigns_id_and_timestamps() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("test_insert_assigns_id_and_timestamps");

    let task = repo
        .insert(CreateTask::new(data.title("a"), "", STATUS_PENDING))
        .await
        .unwrap();

    assert!(task.id.parse::<i64>().is_ok());
    assert_eq!(task.description, "");
    assert_eq!(task.status, STATUS_PENDING);
    assert!(task.created_at.ends_with('Z'));
    assert_eq!(task.created_at, task.updated_at);
    assert_eq!(db.task_count().await, 1);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_fetch_all_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("test_fetch_all_newest_first");

    let first = repo
        .insert(CreateTask::new(data.title("first"), "one", STATUS_PENDING))
        .await
        .unwrap();
    let second = repo
        .insert(CreateTask::new(data.title("second"), "two", STATUS_PENDING))
        .await
        .unwrap();

    let tasks = repo.fetch_all().await.unwrap();
    let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_status_bumps_updated_at() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());
    let data = TestDataBuilder::from_test_name("test_update_status_bumps_updated_at");

    let task = repo
        .insert(CreateTask::new(data.title("x"), "", STATUS_PENDING))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let updated = repo.update_status(&task.id, STATUS_COMPLETED).await.unwrap();
    assert_eq!(updated.status, STATUS_COMPLETED);
    assert_eq!(updated.created_at, task.created_at);
    assert!(updated.updated_at > task.updated_at);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_missing_and_malformed_ids_are_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgTaskRepository::new(db.connection());

    assert!(matches!(
        repo.fetch_by_id("999").await,
        Err(TaskError::NotFound(_))
    ));
    assert!(matches!(
        repo.fetch_by_id("abc").await,
        Err(TaskError::NotFound(_))
    ));
    assert!(matches!(
        repo.update_status("999", STATUS_COMPLETED).await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_complete_twice_through_service() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(PgTaskRepository::new(db.connection()));
    let data = TestDataBuilder::from_test_name("test_complete_twice_through_service");

    let task = service
        .add_task(CreateTask::new(data.title("x"), "", ""))
        .await
        .unwrap();
    assert_eq!(task.status, STATUS_PENDING);

    let done = service.complete_task(&task.id).await.unwrap();
    assert_eq!(done.status, STATUS_COMPLETED);

    let again = service.complete_task(&task.id).await;
    assert_eq!(again, Err(TaskError::AlreadyCompleted(task.id.clone())));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_concurrent_complete_has_one_winner() {
    let db = TestDatabase::new().await;
    let service = Arc::new(TaskService::new(PgTaskRepository::new(db.connection())));
    let data = TestDataBuilder::from_test_name("test_concurrent_complete_has_one_winner");

    let task = service
        .add_task(CreateTask::new(data.title("race"), "", ""))
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            let id = task.id.clone();
            tokio::spawn(async move { service.complete_task(&id).await })
        })
        .collect();

    let results = futures::future::join_all(handles).await;
    let winners = results
        .iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(TaskError::AlreadyCompleted(_)))))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(losers, 7);
}
