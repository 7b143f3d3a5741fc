//! Suggestion panel rendering (subtask decomposition results).

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::theme;
use crate::app::{App, SuggestionView};

/// Render the subtask suggestion panel, if suggestions are active.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = &app.suggestions else {
        return;
    };

    let items = suggestion_items(view);

    let block = Block::default()
        .title("Suggestions (Esc to dismiss)")
        .borders(Borders::ALL)
        .border_style(theme::normal().fg(theme::SUGGESTION));

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Build the list items for a suggestion view.
fn suggestion_items(view: &SuggestionView) -> Vec<ListItem<'_>> {
    if view.pending {
        return vec![ListItem::new(Line::from(Span::styled(
            "Thinking...",
            theme::dimmed(),
        )))];
    }

    view.items
        .iter()
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled("• ", theme::suggestion()),
                Span::styled(item.as_str(), theme::suggestion()),
            ]))
        })
        .collect()
}
