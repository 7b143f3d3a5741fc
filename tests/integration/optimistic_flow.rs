//! Integration tests for the optimistic update flow.
//!
//! Drives the task list controller and the sync coordinator together
//! against a live in-process backend: the list mutates locally first,
//! persists in the background, and keeps its state when persistence
//! fails.
//!
//! Verification command: `cargo test --test optimistic_flow`

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use termtodo::filter::{self, Filter};
use termtodo::net::{self, SyncCommand, SyncConfig, SyncEvent};
use termtodo::tasks::TaskList;
use termtodo_server::api::{self, AppState};

/// Starts the service and a sync coordinator wired to it.
async fn setup() -> (mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncEvent>) {
    let state = Arc::new(AppState::new());
    let (addr, _handle) = api::start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("start server");
    let config = SyncConfig::new(
        Some(format!("http://{addr}")),
        std::env::temp_dir().join("unused-todos.json"),
        None,
        None,
    );
    net::spawn_sync(config)
}

/// Waits for the next event, failing the test on timeout.
async fn next_event(rx: &mut mpsc::Receiver<SyncEvent>) -> SyncEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event within timeout")
        .expect("sync task alive")
}

#[tokio::test]
async fn add_complete_filter_delete_scenario() {
    let (cmd_tx, mut evt_rx) = setup().await;
    let mut list = TaskList::new();

    // Add two tasks optimistically, persisting each.
    list.draft = "Buy milk".to_string();
    let milk = list.add().expect("task added");
    cmd_tx
        .send(SyncCommand::Create(milk.clone()))
        .await
        .expect("send");

    list.draft = "Walk dog".to_string();
    let dog = list.add().expect("task added");
    cmd_tx
        .send(SyncCommand::Create(dog.clone()))
        .await
        .expect("send");

    // Newest first locally.
    let texts: Vec<_> = list.tasks().iter().map(|t| t.text.clone()).collect();
    assert_eq!(texts, vec!["Walk dog", "Buy milk"]);

    // Complete "Buy milk" locally, then persist.
    let updated = list.toggle(&milk.id).expect("toggled");
    assert!(updated.completed);
    cmd_tx
        .send(SyncCommand::Update(updated))
        .await
        .expect("send");

    // Filter views reflect the local state immediately.
    let active: Vec<_> = filter::visible(list.tasks(), Filter::Active)
        .iter()
        .map(|t| t.text.clone())
        .collect();
    assert_eq!(active, vec!["Walk dog"]);
    let done: Vec<_> = filter::visible(list.tasks(), Filter::Completed)
        .iter()
        .map(|t| t.text.clone())
        .collect();
    assert_eq!(done, vec!["Buy milk"]);
    assert_eq!(filter::active_count(list.tasks()), 1);

    // Delete "Walk dog" locally, then persist.
    let removed = list.remove(&dog.id).expect("removed");
    cmd_tx
        .send(SyncCommand::Delete(removed))
        .await
        .expect("send");

    // A reload from the backend converges to the same state.
    cmd_tx.send(SyncCommand::Load).await.expect("send");
    match next_event(&mut evt_rx).await {
        SyncEvent::Loaded(tasks) => {
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].id, milk.id);
            assert!(tasks[0].completed);
        }
        other => panic!("expected Loaded, got {other:?}"),
    }

    cmd_tx.send(SyncCommand::Shutdown).await.expect("send");
}

#[tokio::test]
async fn failed_persistence_reports_but_keeps_local_state() {
    // Nothing listens on port 1, so every persist fails.
    let config = SyncConfig::new(
        Some("http://127.0.0.1:1".to_string()),
        std::env::temp_dir().join("unused-todos.json"),
        None,
        None,
    );
    let (cmd_tx, mut evt_rx) = net::spawn_sync(config);

    let mut list = TaskList::new();
    list.draft = "Buy milk".to_string();
    let task = list.add().expect("task added");
    cmd_tx
        .send(SyncCommand::Create(task))
        .await
        .expect("send");

    match next_event(&mut evt_rx).await {
        SyncEvent::PersistFailed { op, error } => {
            list.record_sync_failure(op, &error);
        }
        other => panic!("expected PersistFailed, got {other:?}"),
    }

    // The optimistic state survives the failure, and the failure is
    // surfaced for the status line.
    assert_eq!(list.tasks().len(), 1);
    assert_eq!(list.tasks()[0].text, "Buy milk");
    assert!(list.last_failure().is_some());

    cmd_tx.send(SyncCommand::Shutdown).await.expect("send");
}

#[tokio::test]
async fn load_failure_clears_loading_and_keeps_list() {
    let config = SyncConfig::new(
        Some("http://127.0.0.1:1".to_string()),
        std::env::temp_dir().join("unused-todos.json"),
        None,
        None,
    );
    let (cmd_tx, mut evt_rx) = net::spawn_sync(config);

    let mut list = TaskList::new();
    list.draft = "already here".to_string();
    let _ = list.add().expect("task added");

    list.begin_load();
    assert!(list.is_loading());
    cmd_tx.send(SyncCommand::Load).await.expect("send");

    match next_event(&mut evt_rx).await {
        SyncEvent::LoadFailed(error) => list.finish_load(Err(error)),
        other => panic!("expected LoadFailed, got {other:?}"),
    }

    assert!(!list.is_loading());
    assert_eq!(list.tasks().len(), 1);

    cmd_tx.send(SyncCommand::Shutdown).await.expect("send");
}
