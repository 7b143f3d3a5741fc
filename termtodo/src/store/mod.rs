//! Sync client: the boundary between the UI state and durable storage.
//!
//! Two backing strategies implement the same four-operation contract,
//! selected once at construction from configuration:
//!
//! - [`RemoteStore`] — JSON over HTTP against the persistence backend.
//! - [`LocalStore`] — a single local JSON file rewritten wholesale.
//!
//! The client is stateless plumbing: no caching, no retry. Each call is a
//! single attempt and callers own the retry policy.

pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use std::path::PathBuf;

use termtodo_proto::task::{Task, TaskId};

/// Errors surfaced by sync client operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or returned a failure on fetch.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected a create call.
    #[error("create failed: {0}")]
    CreateFailed(String),
    /// The backend rejected an update call.
    #[error("update failed: {0}")]
    UpdateFailed(String),
    /// The backend rejected a delete call.
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    /// The local slot could not be serialized.
    #[error("failed to serialize local store: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The local slot could not be written.
    #[error("failed to write local store {path}: {source}")]
    WriteSlot {
        /// Path of the local slot file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// The sync client, polymorphic over the two backing strategies.
///
/// Constructed once from configuration; every operation delegates to the
/// selected variant.
pub enum SyncClient {
    /// Remote HTTP backend.
    Remote(RemoteStore),
    /// Local JSON-file fallback.
    Local(LocalStore),
}

impl SyncClient {
    /// Creates a client backed by the remote HTTP store.
    #[must_use]
    pub fn remote(base_url: &str) -> Self {
        Self::Remote(RemoteStore::new(base_url))
    }

    /// Creates a client backed by the local file store.
    #[must_use]
    pub fn local(path: PathBuf) -> Self {
        Self::Local(LocalStore::new(path))
    }

    /// Fetches all tasks, newest first.
    ///
    /// # Errors
    ///
    /// Under the remote strategy, any transport or backend failure is
    /// propagated as [`StoreError::Unavailable`] — the caller decides what
    /// to show, this layer never substitutes an empty list. The local
    /// strategy treats malformed stored data as empty and cannot fail.
    pub async fn fetch_all(&self) -> Result<Vec<Task>, StoreError> {
        match self {
            Self::Remote(store) => store.fetch_all().await,
            Self::Local(store) => Ok(store.fetch_all()),
        }
    }

    /// Persists a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CreateFailed`] under the remote strategy on
    /// any non-success result; the local strategy fails only if the slot
    /// cannot be serialized or written.
    pub async fn create(&self, task: &Task) -> Result<(), StoreError> {
        match self {
            Self::Remote(store) => store.create(task).await,
            Self::Local(store) => store.create(task),
        }
    }

    /// Persists a full updated task, addressed by its id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UpdateFailed`] under the remote strategy on
    /// any non-success result; the local strategy fails only on
    /// serialization or write errors.
    pub async fn update(&self, task: &Task) -> Result<(), StoreError> {
        match self {
            Self::Remote(store) => store.update(task).await,
            Self::Local(store) => store.update(task),
        }
    }

    /// Deletes the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DeleteFailed`] under the remote strategy on
    /// any non-success result; the local strategy fails only on
    /// serialization or write errors.
    pub async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        match self {
            Self::Remote(store) => store.delete(id).await,
            Self::Local(store) => store.delete(id),
        }
    }
}
