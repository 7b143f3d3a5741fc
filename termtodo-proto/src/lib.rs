//! Shared definitions for the `TermTodo` wire format.

pub mod api;
pub mod task;
