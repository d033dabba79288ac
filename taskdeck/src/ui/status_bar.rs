//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let status_line = Line::from(vec![
        Span::styled(concat!("Taskdeck v", env!("CARGO_PKG_VERSION")), theme::bold()),
        Span::raw(" | "),
        Span::styled("●", theme::normal().fg(theme::SUCCESS)),
        Span::raw(format!(" {}", app.store_label)),
        Span::raw(" | "),
        Span::styled(help_text(app), theme::dimmed()),
    ]);

    let paragraph = Paragraph::new(status_line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}

/// Key help for the current mode.
fn help_text(app: &App) -> &'static str {
    if app.pending_delete.is_some() {
        return "y/Enter: delete | n/Esc: keep";
    }
    if app.state.is_editing() {
        return "Enter: update | Tab: switch field | Esc: cancel";
    }
    match app.focus {
        Focus::Title | Focus::Description => "Enter: add task | Tab: switch panel | Esc: quit",
        Focus::Tasks => {
            "↑↓/jk: select | e: edit | d: delete | r: refresh | Tab: switch panel | q: quit"
        }
    }
}
