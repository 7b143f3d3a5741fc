//! HTTP API body shapes shared between client and server.
//!
//! The persistence backend speaks JSON over four routes rooted at
//! [`TODOS_PATH`]. Task bodies are [`crate::task::Task`]; this module
//! holds the non-task bodies: the error envelope returned on every
//! failure status and the acknowledgment returned by delete.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Base path for the task collection routes.
pub const TODOS_PATH: &str = "/api/todos";

/// Body of `PUT /api/todos/{id}`: a full or partial task.
///
/// Absent fields keep their stored values. `id` and `createdAt` are
/// immutable and ignored if present, so a full [`Task`] body is also a
/// valid patch — the record is always addressed by the path id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// Replacement task text, if given.
    pub text: Option<String>,
    /// Replacement completed flag, if given.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Applies the present fields onto `task`, leaving the rest untouched.
    pub fn apply(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Error envelope body: `{ "message": "..." }` on any 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure description.
    pub message: String,
}

impl ErrorBody {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Acknowledgment body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    /// Confirmation message.
    pub message: String,
}

impl DeleteAck {
    /// The acknowledgment sent when a task was removed.
    #[must_use]
    pub fn deleted() -> Self {
        Self {
            message: "Todo deleted".to_string(),
        }
    }
}
