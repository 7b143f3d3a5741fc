//! `TermTodo` persistence backend library.
//!
//! Exposes the HTTP server for use in tests and embedding. The server
//! accepts JSON CRUD requests for task records keyed by their external
//! client-generated id.

pub mod api;
pub mod config;
pub mod store;
