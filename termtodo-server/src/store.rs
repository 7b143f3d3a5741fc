//! In-memory record store for task documents.
//!
//! Records are held as rows with a monotonically increasing internal row
//! id; the row id is never exposed. All lookups address records by the
//! task's external [`TaskId`], which the client generates before the
//! record exists server-side, so every operation scans by that field
//! rather than by the row id.

use termtodo_proto::api::TaskPatch;
use termtodo_proto::task::{Task, TaskId};
use tokio::sync::RwLock;

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with the same external id already exists.
    #[error("todo already exists: {0}")]
    Conflict(TaskId),
    /// No record matches the given external id.
    #[error("todo not found: {0}")]
    NotFound(TaskId),
    /// The record is missing a required field.
    #[error("invalid todo: {0}")]
    Invalid(String),
}

/// A stored row: internal id plus the task document.
#[derive(Debug, Clone)]
struct Row {
    /// Internal primary key, assigned on insert. Unused by lookups.
    #[allow(dead_code)]
    row_id: u64,
    task: Task,
}

/// Thread-safe in-memory task store.
///
/// Kept deliberately simple: a `Vec` of rows behind an [`RwLock`], scanned
/// by external id on every lookup. Listing returns tasks sorted by
/// creation time, newest first.
pub struct TodoStore {
    rows: RwLock<Vec<Row>>,
    next_row_id: RwLock<u64>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_row_id: RwLock::new(0),
        }
    }

    /// Returns all tasks sorted by `created_at` descending (newest first).
    pub async fn list(&self) -> Vec<Task> {
        let rows = self.rows.read().await;
        let mut tasks: Vec<Task> = rows.iter().map(|r| r.task.clone()).collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    /// Inserts a new task record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] if the text is empty after trimming,
    /// or [`StoreError::Conflict`] if a record with the same id exists.
    pub async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        if task.text.trim().is_empty() {
            return Err(StoreError::Invalid("text is required".to_string()));
        }
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.task.id == task.id) {
            return Err(StoreError::Conflict(task.id));
        }
        let mut next = self.next_row_id.write().await;
        let row_id = *next;
        *next += 1;
        drop(next);
        rows.push(Row {
            row_id,
            task: task.clone(),
        });
        Ok(task)
    }

    /// Merges the patch onto the record whose external id matches `id`
    /// and returns the updated record. Fields absent from the patch keep
    /// their stored values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record matches, or
    /// [`StoreError::Invalid`] if the patch sets the text to a string
    /// that is empty after trimming.
    pub async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        if let Some(text) = &patch.text
            && text.trim().is_empty()
        {
            return Err(StoreError::Invalid("text is required".to_string()));
        }
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|r| r.task.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        patch.apply(&mut row.task);
        Ok(row.task.clone())
    }

    /// Removes the record whose external id matches `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record matches.
    pub async fn remove(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let pos = rows
            .iter()
            .position(|r| r.task.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        rows.remove(pos);
        Ok(())
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(text: &str) -> Task {
        Task::new(text).unwrap()
    }

    #[tokio::test]
    async fn insert_and_list_round_trip() {
        let store = TodoStore::new();
        let task = make_task("Buy milk");
        store.insert(task.clone()).await.unwrap();

        let tasks = store.list().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0], task);
    }

    #[tokio::test]
    async fn list_sorted_newest_first() {
        use termtodo_proto::task::{TaskId, Timestamp};

        let store = TodoStore::new();
        for (text, ms) in [("oldest", 100), ("newest", 300), ("middle", 200)] {
            let task = Task {
                id: TaskId::new(),
                text: text.to_string(),
                completed: false,
                created_at: Timestamp::from_millis(ms),
            };
            store.insert(task).await.unwrap();
        }

        let tasks = store.list().await;
        assert_eq!(tasks[0].text, "newest");
        assert_eq!(tasks[1].text, "middle");
        assert_eq!(tasks[2].text, "oldest");
    }

    #[tokio::test]
    async fn insert_duplicate_id_conflicts() {
        let store = TodoStore::new();
        let task = make_task("Buy milk");
        store.insert(task.clone()).await.unwrap();

        let err = store.insert(task.clone()).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict(task.id));
    }

    #[tokio::test]
    async fn insert_blank_text_invalid() {
        use termtodo_proto::task::{TaskId, Timestamp};

        let store = TodoStore::new();
        let task = Task {
            id: TaskId::new(),
            text: "   ".to_string(),
            completed: false,
            created_at: Timestamp::now(),
        };
        let err = store.insert(task).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }

    #[tokio::test]
    async fn update_merges_partial_patch() {
        let store = TodoStore::new();
        let task = make_task("Walk dog");
        store.insert(task.clone()).await.unwrap();

        let patch = TaskPatch {
            text: None,
            completed: Some(true),
        };
        let updated = store.update(&task.id, &patch).await.unwrap();

        // Only the patched field changes.
        assert!(updated.completed);
        assert_eq!(updated.text, "Walk dog");
        assert_eq!(updated.id, task.id);
        assert_eq!(updated.created_at, task.created_at);

        let tasks = store.list().await;
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
    }

    #[tokio::test]
    async fn update_replaces_text_when_given() {
        let store = TodoStore::new();
        let task = make_task("Walk dog");
        store.insert(task.clone()).await.unwrap();

        let patch = TaskPatch {
            text: Some("Walk the dog twice".to_string()),
            completed: None,
        };
        let updated = store.update(&task.id, &patch).await.unwrap();

        assert_eq!(updated.text, "Walk the dog twice");
        assert!(!updated.completed);
    }

    #[tokio::test]
    async fn update_unknown_id_not_found() {
        let store = TodoStore::new();
        let task = make_task("Walk dog");
        let patch = TaskPatch {
            text: None,
            completed: Some(true),
        };
        let err = store.update(&task.id, &patch).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(task.id));
    }

    #[tokio::test]
    async fn update_blank_text_invalid() {
        let store = TodoStore::new();
        let task = make_task("Walk dog");
        store.insert(task.clone()).await.unwrap();

        let patch = TaskPatch {
            text: Some("   ".to_string()),
            completed: None,
        };
        let err = store.update(&task.id, &patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }

    #[tokio::test]
    async fn remove_deletes_matching_record() {
        let store = TodoStore::new();
        let keep = make_task("Keep me");
        let doomed = make_task("Delete me");
        store.insert(keep.clone()).await.unwrap();
        store.insert(doomed.clone()).await.unwrap();

        store.remove(&doomed.id).await.unwrap();

        let tasks = store.list().await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, keep.id);
    }

    #[tokio::test]
    async fn remove_unknown_id_not_found() {
        let store = TodoStore::new();
        let id = TaskId::new();
        let err = store.remove(&id).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound(id));
    }

    #[tokio::test]
    async fn len_and_is_empty_reflect_state() {
        let store = TodoStore::new();
        assert!(store.is_empty().await);
        store.insert(make_task("One")).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(!store.is_empty().await);
    }
}
