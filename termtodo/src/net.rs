//! Sync coordinator for wiring the TUI to the async persistence layer.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with the async [`SyncClient`] / [`Assistant`] stack. It
//! spawns a background tokio task and communicates with the main thread
//! via [`SyncCommand`] / [`SyncEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── SyncEvent ───  tokio background task
//!                     ─── SyncCommand →
//! ```
//!
//! The main thread applies every mutation to the local task list first,
//! then sends the matching [`SyncCommand`]; persistence runs in the
//! background and never blocks the UI. Failed persistence is reported
//! through [`SyncEvent::PersistFailed`] but the optimistic local state is
//! never rolled back.

use std::path::PathBuf;

use tokio::sync::mpsc;

use termtodo_proto::task::{Task, TaskId};

use crate::assist::Assistant;
use crate::store::SyncClient;
use crate::tasks::SyncOp;

/// Commands sent from the TUI main loop to the sync background task.
#[derive(Debug)]
pub enum SyncCommand {
    /// Fetch the full task list from the store.
    Load,
    /// Persist a newly created task.
    Create(Task),
    /// Persist an updated task (e.g. after a toggle).
    Update(Task),
    /// Delete a task from the store.
    Delete(TaskId),
    /// Request subtask suggestions for the given task.
    BreakDown {
        /// Task whose text is being decomposed.
        id: TaskId,
        /// The task text to decompose.
        text: String,
    },
    /// Gracefully shut down the sync task.
    Shutdown,
}

/// Events sent from the sync background task to the TUI main loop.
#[derive(Debug)]
pub enum SyncEvent {
    /// The initial load completed; the list replaces local state.
    Loaded(Vec<Task>),
    /// The initial load failed; local state is kept as-is.
    LoadFailed(String),
    /// A persistence operation failed after the optimistic local update.
    PersistFailed {
        /// Which operation failed.
        op: SyncOp,
        /// Human-readable failure description.
        error: String,
    },
    /// Subtask suggestions arrived for a task.
    Suggestions {
        /// The task the suggestions belong to.
        id: TaskId,
        /// Suggested subtask texts. Empty when the assistant is
        /// disabled or the call failed.
        items: Vec<String>,
    },
}

/// Configuration for the sync layer.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the persistence service. `None` selects the local
    /// file-backed store instead.
    pub backend_url: Option<String>,
    /// Path of the local store slot (used when `backend_url` is absent).
    pub local_store_path: PathBuf,
    /// Credential for the decomposition assistant. `None` disables it.
    pub api_key: Option<String>,
    /// Override for the assistant's generation endpoint.
    pub assist_url: Option<String>,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
}

/// Default channel capacity for commands and events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl SyncConfig {
    /// Creates a `SyncConfig` with the default channel capacity.
    #[must_use]
    pub const fn new(
        backend_url: Option<String>,
        local_store_path: PathBuf,
        api_key: Option<String>,
        assist_url: Option<String>,
    ) -> Self {
        Self {
            backend_url,
            local_store_path,
            api_key,
            assist_url,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Spawn the sync background task and return channel handles.
///
/// Builds a [`SyncClient`] from the config (remote when a backend URL is
/// configured, local file slot otherwise) and an [`Assistant`], then
/// spawns a command handler that dispatches [`SyncCommand`]s against
/// them and reports outcomes as [`SyncEvent`]s. The caller sends
/// [`SyncCommand::Load`] to populate the task list on startup.
#[must_use]
pub fn spawn_sync(config: SyncConfig) -> (mpsc::Sender<SyncCommand>, mpsc::Receiver<SyncEvent>) {
    let client = match &config.backend_url {
        Some(url) => SyncClient::remote(url),
        None => SyncClient::local(config.local_store_path.clone()),
    };

    let mut assistant = Assistant::new(config.api_key.clone());
    if let Some(url) = &config.assist_url {
        assistant = assistant.with_base_url(url);
    }

    let (cmd_tx, cmd_rx) = mpsc::channel::<SyncCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<SyncEvent>(config.channel_capacity);

    tokio::spawn(async move {
        command_handler(client, assistant, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: handle commands from the TUI main loop.
///
/// Dispatches each [`SyncCommand`] against the store or the assistant.
/// Persistence failures are forwarded as [`SyncEvent::PersistFailed`];
/// the command handler never retries.
async fn command_handler(
    client: SyncClient,
    assistant: Assistant,
    mut cmd_rx: mpsc::Receiver<SyncCommand>,
    evt_tx: mpsc::Sender<SyncEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            SyncCommand::Load => {
                let event = match client.fetch_all().await {
                    Ok(tasks) => SyncEvent::Loaded(tasks),
                    Err(e) => SyncEvent::LoadFailed(e.to_string()),
                };
                if evt_tx.send(event).await.is_err() {
                    break;
                }
            }
            SyncCommand::Create(task) => {
                if let Err(e) = client.create(&task).await {
                    let _ = evt_tx
                        .send(SyncEvent::PersistFailed {
                            op: SyncOp::Create,
                            error: e.to_string(),
                        })
                        .await;
                }
            }
            SyncCommand::Update(task) => {
                if let Err(e) = client.update(&task).await {
                    let _ = evt_tx
                        .send(SyncEvent::PersistFailed {
                            op: SyncOp::Update,
                            error: e.to_string(),
                        })
                        .await;
                }
            }
            SyncCommand::Delete(id) => {
                if let Err(e) = client.delete(&id).await {
                    let _ = evt_tx
                        .send(SyncEvent::PersistFailed {
                            op: SyncOp::Delete,
                            error: e.to_string(),
                        })
                        .await;
                }
            }
            SyncCommand::BreakDown { id, text } => {
                let items = assistant.break_down(&text).await;
                if evt_tx.send(SyncEvent::Suggestions { id, items }).await.is_err() {
                    break;
                }
            }
            SyncCommand::Shutdown => {
                tracing::info!("sync command handler shutting down");
                break;
            }
        }
    }
}
