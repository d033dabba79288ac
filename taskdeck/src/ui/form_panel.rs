//! Create form rendering (title and description inputs + notices).

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{theme, with_cursor};
use crate::app::{App, Focus};

/// Rows taken by the form, borders included.
pub const HEIGHT: u16 = 6;

/// Render the create form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused =
        !app.state.is_editing() && matches!(app.focus, Focus::Title | Focus::Description);

    let block = Block::default()
        .title(Span::styled(
            "Add New Task",
            theme::panel_title(theme::FORM_TITLE),
        ))
        .borders(Borders::ALL)
        .border_style(theme::border(form_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(inner);
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    render_input(
        frame,
        inputs[0],
        "Title",
        &app.state.draft.title,
        "Enter task title",
        (form_focused && app.focus == Focus::Title).then_some(app.cursor_position),
    );
    render_input(
        frame,
        inputs[1],
        "Description",
        &app.state.draft.description,
        "Enter description",
        (form_focused && app.focus == Focus::Description).then_some(app.cursor_position),
    );

    render_notice(frame, rows[1], app);
}

/// Render one bordered input; `cursor` is `Some` when it has focus.
fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    placeholder: &str,
    cursor: Option<usize>,
) {
    let line = match cursor {
        Some(position) => Line::from(Span::styled(with_cursor(text, position), theme::normal())),
        None if text.is_empty() => Line::from(Span::styled(placeholder, theme::dimmed())),
        None => Line::from(Span::styled(text, theme::normal())),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::border(cursor.is_some()));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the success or failure notice under the inputs.
fn render_notice(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(error) = app.state.error() {
        Line::from(Span::styled(error, theme::notice_error()))
    } else if let Some(message) = app.state.message() {
        Line::from(Span::styled(message, theme::notice_success()))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
