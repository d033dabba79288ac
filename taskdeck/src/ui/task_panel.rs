//! Task panel rendering.
//!
//! Each task takes two lines (title, description). The row in edit mode is
//! drawn as two inputs instead.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use taskdeck_proto::task::Task;

use super::{theme, with_cursor};
use crate::app::{App, EditField, Focus};

/// Render the task list.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::Tasks || app.state.is_editing();

    let items: Vec<ListItem> = app
        .state
        .tasks
        .iter()
        .map(|task| {
            let editing = task.id.is_some() && task.id == app.state.editing_id;
            if editing {
                editing_item(app)
            } else {
                task_item(task)
            }
        })
        .collect();

    let title = format!("Your Tasks ({})", app.state.tasks.len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::border(is_focused));

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Line::from(Span::styled(
            "No tasks yet",
            theme::dimmed(),
        )))])
        .block(block)
    } else {
        let highlight = if app.state.is_editing() {
            theme::normal()
        } else if is_focused {
            theme::selected()
        } else {
            theme::highlighted()
        };
        List::new(items).block(block).highlight_style(highlight)
    };

    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Read-only row.
fn task_item(task: &Task) -> ListItem<'_> {
    let marker = if task.id.is_some() { "• " } else { "◦ " };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(marker, theme::dimmed()),
            Span::styled(task.title.as_str(), theme::bold()),
        ]),
        Line::from(Span::styled(
            format!("  {}", task.description),
            theme::dimmed(),
        )),
    ])
}

/// Row in edit mode, showing the edit draft with a cursor in the active
/// input.
fn editing_item(app: &App) -> ListItem<'static> {
    let field_line = |label: &'static str, text: &str, field: EditField| {
        let active = app.edit_field == field;
        let shown = if active {
            with_cursor(text, app.cursor_position)
        } else {
            text.to_string()
        };
        let style = if active {
            theme::highlighted()
        } else {
            theme::editing()
        };
        Line::from(vec![
            Span::styled(label, theme::editing()),
            Span::styled(shown, style),
        ])
    };

    ListItem::new(vec![
        field_line(
            "✎ Title: ",
            &app.state.edit_draft.title,
            EditField::Title,
        ),
        field_line(
            "  Description: ",
            &app.state.edit_draft.description,
            EditField::Description,
        ),
    ])
}
