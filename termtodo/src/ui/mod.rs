//! Terminal UI rendering.

pub mod filter_bar;
pub mod input_bar;
pub mod status_bar;
pub mod suggestion_panel;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Vertical stack: input, filter tabs, task list (+ optional
    // suggestion panel), status bar.
    let mut constraints = vec![
        Constraint::Length(3), // Input
        Constraint::Length(1), // Filter bar
        Constraint::Min(3),    // Task list
    ];
    if app.suggestions.is_some() {
        constraints.push(Constraint::Length(7)); // Suggestions
    }
    constraints.push(Constraint::Length(1)); // Status bar

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    input_bar::render(frame, chunks[0], app);
    filter_bar::render(frame, chunks[1], app);
    task_panel::render(frame, chunks[2], app);

    if app.suggestions.is_some() {
        suggestion_panel::render(frame, chunks[3], app);
    }

    status_bar::render(frame, chunks[chunks.len() - 1], app);
}
