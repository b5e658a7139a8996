//! TUI widgets.

mod command_line;
mod instrument_table;
mod status_line;

pub use command_line::CommandLine;
pub use instrument_table::InstrumentTable;
pub use status_line::StatusLine;
