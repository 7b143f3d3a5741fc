//! Filter bar rendering (All / Active / Completed tabs + active count).

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::App;
use crate::filter::Filter;

/// Render the filter tabs and the remaining-task count.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (i, filter) in Filter::ALL_VALUES.iter().enumerate() {
        let label = format!(" {} {filter} ", i + 1);
        let style = if *filter == app.filter {
            theme::highlighted()
        } else {
            theme::dimmed()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let active = app.active_count();
    let count = if active == 1 {
        "1 task left".to_string()
    } else {
        format!("{active} tasks left")
    };
    spans.push(Span::raw("| "));
    spans.push(Span::styled(count, theme::dimmed()));

    let paragraph = Paragraph::new(Line::from(spans));
    frame.render_widget(paragraph, area);
}
