//! Trade execution.
//!
//! - [`TradeParams`]: operator input and its validation
//! - [`StepPlanner`]: the state table, turning each [`TradeStep`] into primitives
//! - [`TradeSequencer`]: runs one trade through an input driver
//! - [`BatchController`]: repeats a trade with randomized pauses

mod batch;
mod params;
mod sequencer;
mod steps;

pub use batch::{BatchController, BatchReport};
pub use params::{
    Account, OrderType, TradeAction, TradeParams, TradeType, format_price, format_quantity,
};
pub use sequencer::TradeSequencer;
pub use steps::{Pace, Primitive, StepPlanner, TradeStep};
