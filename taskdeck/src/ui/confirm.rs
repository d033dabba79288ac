//! Delete confirmation modal.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::theme;
use crate::app::App;
use crate::controller::DELETE_PROMPT;

/// Render the modal centered over the whole frame.
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered(frame.area(), 50, 7);

    let title = app
        .pending_delete
        .as_ref()
        .and_then(|id| app.state.task(id))
        .map_or("", |t| t.title.as_str());

    let lines = vec![
        Line::from(Span::styled(DELETE_PROMPT, theme::bold())),
        Line::from(Span::styled(title, theme::dimmed())),
        Line::default(),
        Line::from(vec![
            Span::styled("[y] ", theme::notice_error()),
            Span::raw("Delete   "),
            Span::styled("[n] ", theme::highlighted()),
            Span::raw("Keep"),
        ]),
    ];

    let block = Block::default()
        .title("Delete task")
        .borders(Borders::ALL)
        .border_style(theme::normal().fg(theme::ERROR));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// A `percent_x`-wide, `height`-tall rectangle centered in `outer`.
fn centered(outer: Rect, percent_x: u16, height: u16) -> Rect {
    let scaled = u32::from(outer.width) * u32::from(percent_x) / 100;
    let width = u16::try_from(scaled)
        .unwrap_or(outer.width)
        .max(20)
        .min(outer.width);
    let height = height.min(outer.height);
    Rect {
        x: outer.x + (outer.width - width) / 2,
        y: outer.y + (outer.height - height) / 2,
        width,
        height,
    }
}
