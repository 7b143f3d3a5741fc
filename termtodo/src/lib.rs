//! `TermTodo` — terminal-native task-list manager library.

pub mod app;
pub mod assist;
pub mod config;
pub mod filter;
pub mod net;
pub mod store;
pub mod tasks;
pub mod ui;
