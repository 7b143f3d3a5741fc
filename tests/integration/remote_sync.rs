//! Integration tests for remote persistence.
//!
//! Starts the real HTTP service in-process and drives it through the
//! client's remote store: full CRUD round trips, ordering, and failure
//! mapping for missing records and unreachable backends.
//!
//! Verification command: `cargo test --test remote_sync`

use std::sync::Arc;

use termtodo::store::{StoreError, SyncClient};
use termtodo_proto::task::{Task, TaskId};
use termtodo_server::api::{self, AppState};

/// Starts the service on an ephemeral port and returns a client for it.
async fn setup() -> SyncClient {
    let state = Arc::new(AppState::new());
    let (addr, _handle) = api::start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("start server");
    SyncClient::remote(&format!("http://{addr}"))
}

#[tokio::test]
async fn fetch_all_on_empty_store_returns_empty_list() {
    let client = setup().await;
    let tasks = client.fetch_all().await.expect("fetch");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn create_then_fetch_round_trips_the_task() {
    let client = setup().await;
    let task = Task::new("Buy milk").expect("valid task");

    client.create(&task).await.expect("create");
    let tasks = client.fetch_all().await.expect("fetch");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0], task);
}

#[tokio::test]
async fn fetch_all_returns_newest_first() {
    let client = setup().await;
    let first = Task::new("first").expect("valid task");
    // Timestamps have millisecond resolution.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = Task::new("second").expect("valid task");

    client.create(&first).await.expect("create first");
    client.create(&second).await.expect("create second");

    let texts: Vec<_> = client
        .fetch_all()
        .await
        .expect("fetch")
        .into_iter()
        .map(|t| t.text)
        .collect();
    assert_eq!(texts, vec!["second", "first"]);
}

#[tokio::test]
async fn update_toggles_completion_on_the_server() {
    let client = setup().await;
    let task = Task::new("Buy milk").expect("valid task");
    client.create(&task).await.expect("create");

    client.update(&task.toggled()).await.expect("update");

    let tasks = client.fetch_all().await.expect("fetch");
    assert!(tasks[0].completed);
    assert_eq!(tasks[0].id, task.id);
}

#[tokio::test]
async fn delete_removes_the_task() {
    let client = setup().await;
    let keep = Task::new("keep").expect("valid task");
    let drop = Task::new("drop").expect("valid task");
    client.create(&keep).await.expect("create keep");
    client.create(&drop).await.expect("create drop");

    client.delete(&drop.id).await.expect("delete");

    let tasks = client.fetch_all().await.expect("fetch");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, keep.id);
}

#[tokio::test]
async fn update_of_unknown_task_fails() {
    let client = setup().await;
    let ghost = Task::new("never created").expect("valid task");

    let err = client.update(&ghost).await.expect_err("should fail");
    assert!(matches!(err, StoreError::UpdateFailed(_)));
}

#[tokio::test]
async fn delete_of_unknown_task_fails() {
    let client = setup().await;

    let err = client
        .delete(&TaskId::new())
        .await
        .expect_err("should fail");
    assert!(matches!(err, StoreError::DeleteFailed(_)));
}

#[tokio::test]
async fn duplicate_create_fails() {
    let client = setup().await;
    let task = Task::new("Buy milk").expect("valid task");
    client.create(&task).await.expect("create");

    let err = client.create(&task).await.expect_err("should fail");
    assert!(matches!(err, StoreError::CreateFailed(_)));
}

#[tokio::test]
async fn unreachable_backend_maps_to_unavailable() {
    // Port 1 is reserved and nothing listens there.
    let client = SyncClient::remote("http://127.0.0.1:1");

    let err = client.fetch_all().await.expect_err("should fail");
    assert!(matches!(err, StoreError::Unavailable(_)));
}
