//! Command line widget.

use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::Store;

/// The bottom row: the `:` prompt while typing, a hint otherwise.
pub struct CommandLine;

impl CommandLine {
    /// Render the command line.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        if store.app.is_editing() {
            let line = Line::from(vec![
                Span::raw(":"),
                Span::raw(store.app.input_buffer.as_str()),
            ]);
            frame.render_widget(Paragraph::new(line), area);

            let cursor = u16::try_from(store.app.cursor_position + 1).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                area.x + cursor.min(area.width.saturating_sub(1)),
                area.y,
            ));
            return;
        }

        let mut hint = vec![Span::styled(
            "type : for a command",
            Style::default().fg(Color::DarkGray),
        )];
        if store.app.refreshing {
            hint.push(Span::styled(
                "  refreshing...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else if let Some(at) = store.last_refreshed {
            hint.push(Span::styled(
                format!("  updated {}", at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(
            Paragraph::new(Line::from(hint)).alignment(Alignment::Right),
            area,
        );
    }
}
