//! The optimistic task-list controller.

use termtodo_proto::task::{Task, TaskId};

use super::SyncOp;

/// Owns the authoritative ordered task list (newest first) and the pending
/// new-task draft.
///
/// Every mutating operation swaps the list synchronously before any
/// backend call is issued, and returns the value the caller must persist.
/// Because all swaps happen on the single UI thread, a mutation is always
/// visible locally before its backend call starts, and no read-modify-write
/// ever interleaves with another.
pub struct TaskList {
    /// The authoritative list, sorted by `created_at` descending.
    tasks: Vec<Task>,
    /// Pending text for the next task.
    pub draft: String,
    /// Set while the initial fetch is in flight.
    loading: bool,
    /// Most recent sync failure, kept for the status line and logs.
    last_failure: Option<String>,
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskList {
    /// Creates an empty task list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            draft: String::new(),
            loading: false,
            last_failure: None,
        }
    }

    /// Returns the authoritative list, newest first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns `true` while the initial fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the most recent sync failure, if any.
    #[must_use]
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Marks the initial fetch as started.
    pub const fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Applies the outcome of the initial fetch.
    ///
    /// On success the authoritative list is replaced wholesale (re-sorted
    /// newest first in case the source was unordered) and any recorded
    /// failure is cleared, since the backend is plainly reachable again.
    /// On failure the list is left empty and the error is recorded, never
    /// surfaced in-band. The loading flag is cleared on both paths.
    pub fn finish_load(&mut self, result: Result<Vec<Task>, String>) {
        match result {
            Ok(mut tasks) => {
                tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.tasks = tasks;
                self.last_failure = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "initial load failed, starting with empty list");
                self.last_failure = Some(format!("{}: {e}", SyncOp::Fetch));
            }
        }
        self.loading = false;
    }

    /// Creates a task from the current draft and prepends it to the list.
    ///
    /// A whitespace-only draft is a no-op and returns `None`. Otherwise the
    /// draft is cleared and the new task is returned for the caller to
    /// persist with a `create` call.
    pub fn add(&mut self) -> Option<Task> {
        let task = Task::new(&self.draft).ok()?;
        self.tasks.insert(0, task.clone());
        self.draft.clear();
        Some(task)
    }

    /// Flips the `completed` flag of the task with the given id.
    ///
    /// Returns the updated task for the caller to persist with an `update`
    /// call, or `None` (no-op) if no task matches.
    pub fn toggle(&mut self, id: &TaskId) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == *id)?;
        *task = task.toggled();
        Some(task.clone())
    }

    /// Removes the task with the given id from the list.
    ///
    /// Returns the id for the caller to persist with a `delete` call, or
    /// `None` (no-op) if no task matches.
    pub fn remove(&mut self, id: &TaskId) -> Option<TaskId> {
        let pos = self.tasks.iter().position(|t| t.id == *id)?;
        self.tasks.remove(pos);
        Some(id.clone())
    }

    /// Drops all completed tasks from the local list.
    ///
    /// Deliberately local-only: no per-item deletes are issued against the
    /// backend, so the backend keeps the completed tasks until the next
    /// full load. Known, accepted divergence.
    pub fn clear_completed(&mut self) {
        self.tasks.retain(|t| !t.completed);
    }

    /// Records a persist failure for observability. Optimistic local state
    /// is intentionally not reverted.
    pub fn record_sync_failure(&mut self, op: SyncOp, error: &str) {
        tracing::warn!(op = %op, error = %error, "sync call failed, local state kept");
        self.last_failure = Some(format!("{op}: {error}"));
    }
}
