//! Status line widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{StatusLevel, StatusMessage};

/// The last status message, timestamped and colored by severity.
pub struct StatusLine;

impl StatusLine {
    /// Render the status line. Each message replaces the previous one.
    pub fn render(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
        let Some(status) = status else {
            return;
        };

        let line = Line::from(vec![
            Span::styled(
                format!("[{}] ", status.at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(status.message.as_str(), level_style(status.level)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Style for a status severity.
pub fn level_style(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => Style::default(),
        StatusLevel::Warning => Style::default().fg(Color::Yellow),
        StatusLevel::Error => Style::default().fg(Color::Red),
    }
}
