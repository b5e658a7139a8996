//! UI rendering using ratatui.
//!
//! The screen is a plain list: one row per tracked instrument starting at
//! the top, the status line right below, the command line on the last row.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{CommandLine, InstrumentTable, StatusLine};

use crate::config::UiConfig;
use crate::state::Store;
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui {
    config: UiConfig,
}

impl Ui {
    pub fn new(config: UiConfig) -> Self {
        Self { config }
    }

    /// Render the entire UI.
    pub fn render(&self, frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area(), store.instruments.len());

        InstrumentTable::render(frame, layout.table_area, &store.instruments, &self.config);
        StatusLine::render(frame, layout.status_area, store.app.status.as_ref());
        CommandLine::render(frame, layout.command_area, store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, Instrument, StatusMessage};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn store_with(instruments: Vec<Instrument>) -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::InstrumentsUpdated(instruments));
        store
    }

    fn draw(store: &Store, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let ui = Ui::new(UiConfig::default());
        terminal.draw(|frame| ui.render(frame, store)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).unwrap().symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn fg(buffer: &Buffer, x: u16, y: u16) -> Color {
        buffer.cell((x, y)).unwrap().fg
    }

    #[test]
    fn test_rows_at_fixed_columns() {
        let store = store_with(vec![
            Instrument::equity("SCHD").with_quote(dec!(50.1), dec!(52)),
            Instrument::equity("IVV").with_quote(dec!(201.5), dec!(190)),
            Instrument::equity("SPY").with_quote(dec!(291.5), dec!(291.5)),
        ]);
        let buffer = draw(&store, 50, 8);

        assert_eq!(
            row_text(&buffer, 0),
            format!("{:<20}{:<10}{}", "SCHD", "50.10", "-3.65%")
        );
        assert_eq!(
            row_text(&buffer, 1),
            format!("{:<20}{:<10}{}", "IVV", "201.50", "6.05%")
        );
        assert_eq!(
            row_text(&buffer, 2),
            format!("{:<20}{:<10}{}", "SPY", "291.50", "0.00%")
        );

        assert_eq!(fg(&buffer, 30, 0), Color::Red);
        assert_eq!(fg(&buffer, 30, 1), Color::Green);
        assert_eq!(fg(&buffer, 30, 2), Color::Reset);
        assert_eq!(fg(&buffer, 0, 0), Color::Reset);
    }

    #[test]
    fn test_status_line_below_table() {
        let mut store = store_with(vec![Instrument::equity("SPY").with_quote(dec!(1), dec!(1))]);
        store.reduce(Action::ShowStatus(StatusMessage::error("failed to refresh SPY")));
        let buffer = draw(&store, 60, 6);

        let status = row_text(&buffer, 1);
        assert!(status.starts_with('['), "{}", status);
        assert!(status.ends_with("] failed to refresh SPY"), "{}", status);
        assert_eq!(fg(&buffer, 11, 1), Color::Red);
    }

    #[test]
    fn test_command_line_echoes_input() {
        let mut store = store_with(Vec::new());
        store.reduce(Action::EnterCommandMode);
        for c in "follow SPY".chars() {
            store.reduce(Action::InputChar(c));
        }
        let buffer = draw(&store, 40, 5);

        assert_eq!(row_text(&buffer, 4), ":follow SPY");
    }

    #[test]
    fn test_shorter_value_leaves_no_residue() {
        let mut terminal = Terminal::new(TestBackend::new(50, 5)).unwrap();
        let ui = Ui::new(UiConfig::default());

        let mut store = store_with(vec![Instrument::equity("BRK-A").with_quote(
            dec!(123456.78),
            dec!(100000),
        )]);
        terminal.draw(|frame| ui.render(frame, &store)).unwrap();

        store.reduce(Action::InstrumentsUpdated(vec![
            Instrument::equity("BRK-A").with_quote(dec!(9.5), dec!(9.5)),
        ]));
        terminal.draw(|frame| ui.render(frame, &store)).unwrap();

        assert_eq!(
            row_text(terminal.backend().buffer(), 0),
            format!("{:<20}{:<10}{}", "BRK-A", "9.50", "0.00%")
        );
    }
}
