//! Terminal UI rendering.

pub mod confirm;
pub mod form_panel;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header, create form, task list, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(form_panel::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    form_panel::render(frame, chunks[1], app);
    task_panel::render(frame, chunks[2], app);
    status_bar::render(frame, chunks[3], app);

    if app.pending_delete.is_some() {
        confirm::render(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line = Line::from(vec![
        Span::styled("Taskdeck", theme::bold()),
        Span::styled("  organize your tasks", theme::dimmed()),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Returns `text` with a block cursor drawn at character index `cursor`.
#[must_use]
pub fn with_cursor(text: &str, cursor: usize) -> String {
    let mut display = String::with_capacity(text.len() + 3);
    let mut placed = false;
    for (i, c) in text.chars().enumerate() {
        if i == cursor {
            display.push('█');
            placed = true;
        }
        display.push(c);
    }
    if !placed {
        display.push('█');
    }
    display
}
