//! Instrument rows.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
};
use rust_decimal::Decimal;

use super::super::layout::row_cells;
use crate::config::UiConfig;
use crate::state::Instrument;

/// One line per instrument: identifier, price, percent change.
pub struct InstrumentTable;

impl InstrumentTable {
    /// Render the rows top to bottom. Rows past the bottom of `area` are
    /// not drawn.
    pub fn render(frame: &mut Frame, area: Rect, instruments: &[Instrument], ui: &UiConfig) {
        for (i, instrument) in instruments.iter().enumerate() {
            let Ok(offset) = u16::try_from(i) else {
                break;
            };
            if offset >= area.height {
                break;
            }

            let row = Rect::new(area.x, area.y + offset, area.width, 1);
            let [id_area, price_area, change_area] =
                row_cells(row, ui.price_column, ui.change_column);

            let (change, change_style) = change_cell(instrument);
            frame.render_widget(Paragraph::new(instrument.identifier()), id_area);
            frame.render_widget(Paragraph::new(price_cell(instrument)), price_area);
            frame.render_widget(Paragraph::new(change).style(change_style), change_area);
        }
    }
}

fn price_cell(instrument: &Instrument) -> String {
    instrument
        .price
        .map(|price| format!("{:.2}", price))
        .unwrap_or_else(|| "--".to_string())
}

fn change_cell(instrument: &Instrument) -> (String, Style) {
    if !instrument.has_baseline() {
        return ("n/a".to_string(), Style::default().fg(Color::Yellow));
    }

    let change = instrument.percent_change();
    let style = if change > Decimal::ZERO {
        Style::default().fg(Color::Green)
    } else if change < Decimal::ZERO {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    (format!("{:.2}%", change), style)
}
