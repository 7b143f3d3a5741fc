//! Local JSON-file fallback store.
//!
//! The whole task list lives in a single file as one serialized JSON
//! array, read and rewritten wholesale on every operation. Reads never
//! fail: a missing file is an empty list, and a corrupt slot is treated
//! as empty and logged rather than thrown.

use std::path::{Path, PathBuf};

use termtodo_proto::task::{Task, TaskId};

use super::StoreError;

/// File-backed task store used when no remote backend is configured.
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Creates a store over the given slot file path. The file need not
    /// exist yet; parent directories are created on first write.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole slot. Missing or corrupt contents yield an empty
    /// list; corruption is logged.
    #[must_use]
    pub fn fetch_all(&self) -> Vec<Task> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read local store");
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "local store slot is corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Prepends the task and rewrites the slot.
    ///
    /// # Errors
    ///
    /// Returns an error only if the slot cannot be serialized or written.
    pub fn create(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.fetch_all();
        tasks.insert(0, task.clone());
        self.write_slot(&tasks)
    }

    /// Replaces the matching task and rewrites the slot. An absent id
    /// leaves the slot unchanged (mirrors a map-over-list replace).
    ///
    /// # Errors
    ///
    /// Returns an error only if the slot cannot be serialized or written.
    pub fn update(&self, task: &Task) -> Result<(), StoreError> {
        let mut tasks = self.fetch_all();
        for stored in &mut tasks {
            if stored.id == task.id {
                *stored = task.clone();
            }
        }
        self.write_slot(&tasks)
    }

    /// Removes the matching task and rewrites the slot. An absent id
    /// leaves the slot unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error only if the slot cannot be serialized or written.
    pub fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let mut tasks = self.fetch_all();
        tasks.retain(|t| t.id != *id);
        self.write_slot(&tasks)
    }

    /// Serializes and writes the whole slot, creating parent directories
    /// as needed.
    fn write_slot(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string(tasks)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteSlot {
                path: self.path.clone(),
                source: e,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|e| StoreError::WriteSlot {
            path: self.path.clone(),
            source: e,
        })
    }
}
