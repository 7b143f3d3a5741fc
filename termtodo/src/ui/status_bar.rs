//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, PanelFocus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        PanelFocus::Input => "Enter: add | Tab: switch panel | Esc: quit",
        PanelFocus::List => {
            "Enter/Space: toggle | d: delete | c: clear done | b: break down | 1/2/3: filter | Esc: quit"
        }
    };

    // Sync failures take priority over routine status messages.
    let (dot_color, status_text) = app.list.last_failure().map_or_else(
        || {
            let text = app
                .status_message
                .clone()
                .unwrap_or_else(|| format!("{} store", app.store_label));
            (theme::SUCCESS, text)
        },
        |failure| (theme::WARNING, format!("sync failed ({failure})")),
    );

    let status_line = Line::from(vec![
        Span::styled("TermTodo v0.1.0", theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(dot_color)),
        Span::raw(format!(" {status_text}")),
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
