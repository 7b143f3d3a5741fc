//! Integration tests for the file-backed local store.
//!
//! Exercises the fallback used when no backend URL is configured:
//! persistence across client instances, missing and corrupt store
//! files, and CRUD through the same [`SyncClient`] surface as remote.
//!
//! Verification command: `cargo test --test local_fallback`

use std::path::PathBuf;

use termtodo::store::SyncClient;
use termtodo_proto::task::Task;

fn slot_in(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("todos.json")
}

#[tokio::test]
async fn missing_slot_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = SyncClient::local(slot_in(&dir));

    let tasks = client.fetch_all().await.expect("fetch");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn create_persists_across_client_instances() {
    let dir = tempfile::tempdir().expect("tempdir");
    let task = Task::new("Buy milk").expect("valid task");

    {
        let client = SyncClient::local(slot_in(&dir));
        client.create(&task).await.expect("create");
    }

    let reopened = SyncClient::local(slot_in(&dir));
    let tasks = reopened.fetch_all().await.expect("fetch");
    assert_eq!(tasks, vec![task]);
}

#[tokio::test]
async fn create_prepends_newest_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = SyncClient::local(slot_in(&dir));

    let first = Task::new("first").expect("valid task");
    let second = Task::new("second").expect("valid task");
    client.create(&first).await.expect("create");
    client.create(&second).await.expect("create");

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
async fn update_and_delete_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let client = SyncClient::local(slot_in(&dir));

    let task = Task::new("Buy milk").expect("valid task");
    client.create(&task).await.expect("create");

    client.update(&task.toggled()).await.expect("update");
    let tasks = client.fetch_all().await.expect("fetch");
    assert!(tasks[0].completed);

    client.delete(&task.id).await.expect("delete");
    let tasks = client.fetch_all().await.expect("fetch");
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn corrupt_slot_reads_as_empty_and_recovers_on_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = slot_in(&dir);
    std::fs::write(&path, "{not json").expect("write corrupt slot");

    let client = SyncClient::local(path);
    let tasks = client.fetch_all().await.expect("fetch");
    assert!(tasks.is_empty());

    // The next write replaces the corrupt slot wholesale.
    let task = Task::new("fresh start").expect("valid task");
    client.create(&task).await.expect("create");
    let tasks = client.fetch_all().await.expect("fetch");
    assert_eq!(tasks, vec![task]);
}

#[tokio::test]
async fn create_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a").join("b").join("todos.json");

    let client = SyncClient::local(nested);
    let task = Task::new("Buy milk").expect("valid task");
    client.create(&task).await.expect("create");

    assert_eq!(client.fetch_all().await.expect("fetch").len(), 1);
}
