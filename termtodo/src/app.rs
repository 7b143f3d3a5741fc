//! Application state and event handling.
//!
//! [`App`] owns the task list, filter, focus, and selection state, and
//! translates key events into local mutations. Mutations are applied
//! optimistically; when a mutation needs persistence, `handle_key_event`
//! returns the matching [`SyncCommand`] for the caller to dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use termtodo_proto::task::{Task, TaskId};

use crate::filter::{self, Filter};
use crate::net::SyncCommand;
use crate::tasks::TaskList;

/// Which panel is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    /// Input box is focused (default).
    Input,
    /// Task list is focused.
    List,
}

/// Subtask suggestions for one task, shown in the suggestion panel.
#[derive(Debug, Clone)]
pub struct SuggestionView {
    /// The task the suggestions belong to.
    pub task_id: TaskId,
    /// Suggested subtask texts.
    pub items: Vec<String>,
    /// `true` while the decomposition request is in flight.
    pub pending: bool,
}

/// Main application state.
pub struct App {
    /// The task list controller.
    pub list: TaskList,
    /// Active filter for the task panel.
    pub filter: Filter,
    /// Which panel is focused.
    pub focus: PanelFocus,
    /// Selected index within the *visible* (filtered) tasks.
    pub selected: usize,
    /// Cursor position in the draft input (character index).
    pub cursor_position: usize,
    /// Current suggestion panel contents, if any.
    pub suggestions: Option<SuggestionView>,
    /// Whether the sync backend is remote ("Remote") or local ("Local").
    pub store_label: String,
    /// Most recent status line message.
    pub status_message: Option<String>,
    /// Timestamp display format string (chrono).
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new application with an empty task list.
    #[must_use]
    pub fn new(store_label: &str) -> Self {
        Self {
            list: TaskList::new(),
            filter: Filter::All,
            focus: PanelFocus::Input,
            selected: 0,
            cursor_position: 0,
            suggestions: None,
            store_label: store_label.to_string(),
            status_message: None,
            timestamp_format: "%b %e %H:%M".to_string(),
            should_quit: false,
        }
    }

    /// Set the timestamp display format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// Tasks visible under the current filter, newest first.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible(self.list.tasks(), self.filter)
    }

    /// Number of tasks not yet completed, regardless of filter.
    #[must_use]
    pub fn active_count(&self) -> usize {
        filter::active_count(self.list.tasks())
    }

    /// Set the status line message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Record the arrival of subtask suggestions for a task.
    ///
    /// Ignored when the suggestion panel has moved on to another task.
    pub fn apply_suggestions(&mut self, task_id: &TaskId, items: Vec<String>) {
        if let Some(view) = &mut self.suggestions
            && view.task_id == *task_id
        {
            if items.is_empty() {
                self.set_status("No suggestions available".to_string());
                self.suggestions = None;
            } else {
                view.items = items;
                view.pending = false;
            }
        }
    }

    /// Handle a key event, applying the mutation locally.
    ///
    /// Returns `Some(SyncCommand)` when the mutation must also be
    /// persisted. The caller dispatches the command; local state is
    /// already updated either way.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        // Global shortcuts
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Esc, _) => {
                // Esc dismisses the suggestion panel first, then quits.
                if self.suggestions.is_some() {
                    self.suggestions = None;
                } else {
                    self.should_quit = true;
                }
                return None;
            }
            (KeyCode::Tab | KeyCode::BackTab, _) => {
                self.toggle_focus();
                return None;
            }
            _ => {}
        }

        match self.focus {
            PanelFocus::Input => self.handle_input_key(key),
            PanelFocus::List => self.handle_list_key(key),
        }
    }

    /// Handle key event when the input box is focused.
    fn handle_input_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Enter => return self.submit_draft(),
            KeyCode::Char(c) => self.enter_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.list.draft.len(),
            _ => {}
        }
        None
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<SyncCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => return self.toggle_selected(),
            KeyCode::Delete | KeyCode::Char('d') => return self.delete_selected(),
            KeyCode::Char('c') => self.clear_completed(),
            KeyCode::Char('b') => return self.break_down_selected(),
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Active),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            _ => {}
        }
        None
    }

    /// Toggle focus between the input box and the task list.
    const fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PanelFocus::Input => PanelFocus::List,
            PanelFocus::List => PanelFocus::Input,
        };
    }

    /// Switch the active filter and clamp the selection.
    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.clamp_selection();
    }

    /// Submit the draft as a new task (optimistic prepend).
    fn submit_draft(&mut self) -> Option<SyncCommand> {
        let task = self.list.add()?;
        self.cursor_position = 0;
        Some(SyncCommand::Create(task))
    }

    /// Toggle completion of the selected task (optimistic).
    fn toggle_selected(&mut self) -> Option<SyncCommand> {
        let id = self.selected_task_id()?;
        let updated = self.list.toggle(&id)?;
        self.clamp_selection();
        Some(SyncCommand::Update(updated))
    }

    /// Delete the selected task (optimistic).
    fn delete_selected(&mut self) -> Option<SyncCommand> {
        let id = self.selected_task_id()?;
        let removed = self.list.remove(&id)?;
        self.clamp_selection();
        Some(SyncCommand::Delete(removed))
    }

    /// Remove all completed tasks. Local-only: not persisted.
    fn clear_completed(&mut self) {
        self.list.clear_completed();
        self.clamp_selection();
    }

    /// Request subtask suggestions for the selected task.
    fn break_down_selected(&mut self) -> Option<SyncCommand> {
        let id = self.selected_task_id()?;
        let text = self
            .list
            .tasks()
            .iter()
            .find(|t| t.id == id)?
            .text
            .clone();
        self.suggestions = Some(SuggestionView {
            task_id: id.clone(),
            items: Vec::new(),
            pending: true,
        });
        Some(SyncCommand::BreakDown { id, text })
    }

    /// ID of the task currently selected in the visible list.
    fn selected_task_id(&self) -> Option<TaskId> {
        self.visible_tasks().get(self.selected).map(|t| t.id.clone())
    }

    /// Keep the selection within the visible list bounds.
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Select the previous visible task.
    const fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Select the next visible task.
    fn select_next(&mut self) {
        if self.selected + 1 < self.visible_tasks().len() {
            self.selected += 1;
        }
    }

    /// Insert a character at the cursor position.
    fn enter_char(&mut self, c: char) {
        self.list.draft.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor.
    fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.list.draft[..self.cursor_position]
                .chars()
                .next_back()
                .map_or(0, char::len_utf8);
            self.cursor_position -= prev;
            self.list.draft.remove(self.cursor_position);
        }
    }

    /// Move cursor left by one character.
    fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            let prev = self.list.draft[..self.cursor_position]
                .chars()
                .next_back()
                .map_or(0, char::len_utf8);
            self.cursor_position -= prev;
        }
    }

    /// Move cursor right by one character.
    fn move_cursor_right(&mut self) {
        if self.cursor_position < self.list.draft.len() {
            let next = self.list.draft[self.cursor_position..]
                .chars()
                .next()
                .map_or(0, char::len_utf8);
            self.cursor_position += next;
        }
    }
}
