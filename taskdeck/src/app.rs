//! Application state and event handling.
//!
//! [`App`] wraps the [`ControllerState`] with the UI-only state needed to
//! drive it from a keyboard: focus, list selection, cursor, and the delete
//! confirmation modal. Key handling never talks to the store; it returns
//! the [`StoreCommand`] to dispatch, and resolved commands come back
//! through [`App::apply_event`].

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_proto::task::{Task, TaskId};

use crate::controller::ControllerState;
use crate::store::{StoreCommand, StoreEvent};

/// Which part of the screen receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Create form title input (default).
    Title,
    /// Create form description input.
    Description,
    /// Task list.
    Tasks,
}

/// Which input of the editing row is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// Title input.
    Title,
    /// Description input.
    Description,
}

/// Main application state.
pub struct App {
    /// Task cache, forms and notices.
    pub state: ControllerState,
    /// Which panel is focused.
    pub focus: Focus,
    /// Selected row in the task list.
    pub selected: usize,
    /// Active input while a row is in edit mode.
    pub edit_field: EditField,
    /// Cursor position in the active input (character index).
    pub cursor_position: usize,
    /// Task awaiting a yes/no answer before it is deleted.
    pub pending_delete: Option<TaskId>,
    /// Where tasks are stored, for the status bar.
    pub store_label: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create an app around an empty controller state.
    #[must_use]
    pub fn new(state: ControllerState, store_label: impl Into<String>) -> Self {
        Self {
            state,
            focus: Focus::Title,
            selected: 0,
            edit_field: EditField::Title,
            cursor_position: 0,
            pending_delete: None,
            store_label: store_label.into(),
            should_quit: false,
        }
    }

    /// The task under the list selection, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.state.tasks.get(self.selected)
    }

    /// Text of the input that currently receives typed characters.
    #[must_use]
    pub fn active_text(&self) -> Option<&str> {
        if self.state.is_editing() {
            return Some(match self.edit_field {
                EditField::Title => &self.state.edit_draft.title,
                EditField::Description => &self.state.edit_draft.description,
            });
        }
        match self.focus {
            Focus::Title => Some(&self.state.draft.title),
            Focus::Description => Some(&self.state.draft.description),
            Focus::Tasks => None,
        }
    }

    /// Apply a resolved store command and keep selection and cursor valid.
    pub fn apply_event(&mut self, event: StoreEvent) {
        self.state.apply(event);
        self.clamp_selection();
        let len = self.active_text().map_or(0, |t| t.chars().count());
        self.cursor_position = self.cursor_position.min(len);
    }

    /// Clear notices that have been shown long enough.
    pub fn tick(&mut self, now: Instant) {
        self.state.expire_notices(now);
    }

    /// Handle a key event.
    ///
    /// Returns the store request the key triggered, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.pending_delete.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.state.is_editing() {
            return self.handle_edit_key(key);
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return None;
            }
            KeyCode::BackTab => {
                self.cycle_focus_backward();
                return None;
            }
            KeyCode::Tab => {
                self.cycle_focus_forward();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Title | Focus::Description => self.handle_form_key(key),
            Focus::Tasks => self.handle_list_key(key),
        }
    }

    /// Handle key event while the delete confirmation is open.
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        let answer = match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => true,
            KeyCode::Char('n' | 'N') | KeyCode::Esc => false,
            _ => return None,
        };
        let id = self.pending_delete.take()?;
        self.state.prepare_delete(&id, &mut |_: &str| answer)
    }

    /// Handle key event while a row is in edit mode.
    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Enter => return self.state.prepare_update(),
            KeyCode::Esc => {
                self.state.cancel_edit();
                self.cursor_position = 0;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.edit_field = match self.edit_field {
                    EditField::Title => EditField::Description,
                    EditField::Description => EditField::Title,
                };
                self.cursor_to_end();
            }
            _ => self.edit_text(key),
        }
        None
    }

    /// Handle key event when a create form input is focused.
    fn handle_form_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        if key.code == KeyCode::Enter {
            return self.state.prepare_create();
        }
        self.edit_text(key);
        None
    }

    /// Handle key event when the task list is focused.
    fn handle_list_key(&mut self, key: KeyEvent) -> Option<StoreCommand> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('e') | KeyCode::Enter => self.begin_edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => {
                self.pending_delete = self.selected_task().and_then(|t| t.id.clone());
            }
            KeyCode::Char('r') => return Some(StoreCommand::List),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        None
    }

    fn begin_edit_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if self.state.begin_edit(&task) {
            self.edit_field = EditField::Title;
            self.cursor_to_end();
        }
    }

    /// Apply a text-editing key to the active input.
    fn edit_text(&mut self, key: KeyEvent) {
        let cursor = &mut self.cursor_position;
        let Some(text) = active_field(&mut self.state, self.focus, self.edit_field) else {
            return;
        };
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let at = byte_index(text, *cursor);
                text.insert(at, c);
                *cursor += 1;
            }
            KeyCode::Backspace if *cursor > 0 => {
                *cursor -= 1;
                let at = byte_index(text, *cursor);
                text.remove(at);
            }
            KeyCode::Delete if *cursor < text.chars().count() => {
                let at = byte_index(text, *cursor);
                text.remove(at);
            }
            KeyCode::Left => *cursor = cursor.saturating_sub(1),
            KeyCode::Right => *cursor = (*cursor + 1).min(text.chars().count()),
            KeyCode::Home => *cursor = 0,
            KeyCode::End => *cursor = text.chars().count(),
            _ => {}
        }
    }

    /// Cycle focus forward: Title -> Description -> Tasks -> Title.
    fn cycle_focus_forward(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::Description,
            Focus::Description => Focus::Tasks,
            Focus::Tasks => Focus::Title,
        };
        self.cursor_to_end();
    }

    /// Cycle focus backward: Title -> Tasks -> Description -> Title.
    fn cycle_focus_backward(&mut self) {
        self.focus = match self.focus {
            Focus::Title => Focus::Tasks,
            Focus::Tasks => Focus::Description,
            Focus::Description => Focus::Title,
        };
        self.cursor_to_end();
    }

    fn cursor_to_end(&mut self) {
        self.cursor_position = self.active_text().map_or(0, |t| t.chars().count());
    }

    const fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.state.tasks.len() {
            self.selected += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.state.tasks.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

/// The string typed keys edit, given the focus and edit mode.
fn active_field(
    state: &mut ControllerState,
    focus: Focus,
    edit_field: EditField,
) -> Option<&mut String> {
    if state.is_editing() {
        return Some(match edit_field {
            EditField::Title => &mut state.edit_draft.title,
            EditField::Description => &mut state.edit_draft.description,
        });
    }
    match focus {
        Focus::Title => Some(&mut state.draft.title),
        Focus::Description => Some(&mut state.draft.description),
        Focus::Tasks => None,
    }
}

/// Byte offset of the `char_index`-th character (or the end of `text`).
fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(i, _)| i)
}
