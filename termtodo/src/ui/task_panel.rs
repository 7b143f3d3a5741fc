//! Task panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use termtodo_proto::task::Timestamp;

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the task list for the current filter.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == PanelFocus::List;
    let visible = app.visible_tasks();

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let checkbox = if task.completed { "[✓]" } else { "[ ]" };
            let checkbox_style = if task.completed {
                theme::normal().fg(theme::DONE)
            } else {
                theme::normal()
            };
            let text_style = if is_focused && i == app.selected {
                theme::selected()
            } else if task.completed {
                theme::completed()
            } else {
                theme::normal()
            };

            let line = Line::from(vec![
                Span::styled(checkbox, checkbox_style),
                Span::raw(" "),
                Span::styled(task.text.clone(), text_style),
                Span::raw("  "),
                Span::styled(
                    format_created_at(task.created_at, &app.timestamp_format),
                    theme::timestamp(),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let title = if app.list.is_loading() {
        "Tasks (loading...)"
    } else {
        "Tasks"
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    let list = List::new(items).block(block);

    frame.render_widget(list, area);
}

/// Format a creation timestamp with the configured chrono format.
fn format_created_at(ts: Timestamp, format: &str) -> String {
    use chrono::{Local, TimeZone};
    let ms = ts.as_millis();
    let secs = (ms / 1000).cast_signed();
    let nsecs = u32::try_from((ms % 1000) * 1_000_000).unwrap_or(0);
    match Local.timestamp_opt(secs, nsecs) {
        chrono::LocalResult::Single(dt) => dt.format(format).to_string(),
        _ => String::new(),
    }
}
