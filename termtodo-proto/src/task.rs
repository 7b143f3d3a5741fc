//! Task model for the `TermTodo` wire format.
//!
//! A [`Task`] is the sole persisted entity. It is serialized as JSON with
//! the wire shape `{ id, text, completed, createdAt }` and exchanged
//! between the client and the persistence backend over HTTP.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
///
/// Generated on the client at creation time, before the record exists
/// server-side, so all backend lookups address tasks by this external id
/// rather than by any internal row identifier. UUID v7 combines a
/// millisecond timestamp with random bits, making collisions across
/// uncoordinated client instances practically impossible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Millisecond-precision UTC timestamp, serialized as a bare number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp for the current instant.
    #[must_use]
    pub fn now() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    /// Creates a timestamp from milliseconds since the UNIX epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as milliseconds since the UNIX epoch.
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Error returned when task text fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Task text is empty after trimming surrounding whitespace.
    #[error("task text cannot be empty")]
    Empty,
}

/// A single to-do record.
///
/// `id` and `created_at` are assigned once at creation and never change.
/// `completed` is the only field mutated over the task's lifetime; there
/// is no text editing and no archival state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// External correlation key between client and backend.
    pub id: TaskId,
    /// User-supplied description, non-empty, whitespace-trimmed.
    pub text: String,
    /// Whether the task has been completed.
    pub completed: bool,
    /// When the task was created (milliseconds since epoch). Default
    /// sort key, newest first.
    pub created_at: Timestamp,
}

impl Task {
    /// Creates a new task from user input, trimming surrounding whitespace
    /// and stamping a fresh id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] if the trimmed text is empty.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self {
            id: TaskId::new(),
            text: trimmed.to_string(),
            completed: false,
            created_at: Timestamp::now(),
        })
    }

    /// Returns a copy of this task with `completed` flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Encodes a [`Task`] to its JSON wire form.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn encode(task: &Task) -> Result<String, String> {
    serde_json::to_string(task).map_err(|e| format!("task encode error: {e}"))
}

/// Decodes a [`Task`] from its JSON wire form.
///
/// # Errors
///
/// Returns an error string if deserialization fails.
pub fn decode(json: &str) -> Result<Task, String> {
    serde_json::from_str(json).map_err(|e| format!("task decode error: {e}"))
}
