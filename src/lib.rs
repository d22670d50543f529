//! # clicktrader
//!
//! Places orders in a desktop trading application by replaying recorded
//! screen positions with synthesized pointer and keyboard input.
//!
//! ## Architecture
//!
//! - **Positions**: label to screen-coordinate map and its JSON store
//! - **Recorder**: interactive capture of positions from global input events
//! - **Trade**: parameter validation, the step table, sequencer and batch controller
//! - **Input**: input-injection seam and its enigo implementation
//! - **Events**: global listener seam and its device_query implementation
//! - **Pacing**: randomized settle delays on an injectable clock
//! - **Config**: layered settings

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod pacing;
pub mod positions;
pub mod recorder;
pub mod trade;

#[cfg(test)]
mod testing;

pub use app::App;
pub use cli::{Cli, Mode};
pub use crate::config::Settings;
pub use error::{Error, ErrorKind, Result};
pub use trade::{BatchController, TradeParams, TradeSequencer, TradeStep};
