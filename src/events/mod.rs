//! Event handling for Stonkwatch.
//!
//! Terminal events are read by the interactive loop and mapped to
//! [`Action`](crate::state::Action)s according to the current input mode.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
