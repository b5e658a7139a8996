//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// One line per tracked instrument, from the top.
    pub table_area: Rect,
    /// Status line directly below the table.
    pub status_area: Rect,
    /// Command line on the bottom row.
    pub command_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area and the number of rows.
    pub fn new(area: Rect, rows: usize) -> Self {
        // Keep the status and command lines on screen.
        let rows = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .min(area.height.saturating_sub(2));
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(rows), // Instruments
                Constraint::Length(1),    // Status line
                Constraint::Fill(1),      // Spacer
                Constraint::Length(1),    // Command line
            ])
            .split(area);

        Self {
            table_area: chunks[0],
            status_area: chunks[1],
            command_area: chunks[3],
        }
    }
}

/// Split a row into the identifier, price and change cells.
pub fn row_cells(row: Rect, price_column: u16, change_column: u16) -> [Rect; 3] {
    let price_x = price_column.min(row.width);
    let change_x = change_column.max(price_x).min(row.width);

    [
        Rect::new(row.x, row.y, price_x, 1),
        Rect::new(row.x + price_x, row.y, change_x - price_x, 1),
        Rect::new(row.x + change_x, row.y, row.width - change_x, 1),
    ]
}
