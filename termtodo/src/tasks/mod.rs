//! Authoritative task-list state for the `TermTodo` client.
//!
//! The [`TaskList`] owns the in-memory list of tasks and applies every
//! mutation optimistically: the local list changes first, then the caller
//! persists the change through the sync client. Persist failures are
//! recorded for observability but never rolled back; the list and the
//! backend reconcile on the next full load.

pub mod list;

pub use list::TaskList;

/// The sync operation a recorded failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    /// Full fetch of the backend list.
    Fetch,
    /// Persisting a newly created task.
    Create,
    /// Persisting a completed-flag change.
    Update,
    /// Persisting a deletion.
    Delete,
}

impl std::fmt::Display for SyncOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}
