//! # Stonkwatch - Terminal Quote Tracker
//!
//! A terminal dashboard that follows a list of equities and option
//! contracts, refreshes their quotes in the background and shows the
//! percent change since the previous close.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the interactive event loop
//! - **State**: Instrument model, the shared registry and the UI store
//! - **Refresh**: The periodic, triggerable refresh scheduler
//! - **Commands**: Parsing and dispatch of `:` command lines
//! - **API**: The quote provider boundary and its Yahoo Finance client
//! - **UI**: Layout and rendering logic
//! - **Events**: Input handling
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod refresh;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
pub use refresh::{RefreshScheduler, SchedulerState};
pub use state::{Instrument, Registry};
