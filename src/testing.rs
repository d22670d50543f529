//! Shared fakes for unit tests.

use crate::error::{Error, Result};
use crate::events::{EventSource, InputEvent, Key};
use crate::input::InputDriver;
use crate::pacing::Clock;
use crate::positions::{Anchor, CoordinateMap};
use crate::recorder::RECORDING_SCRIPT;
use crate::trade::TradeParams;
use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Clock that records requested sleeps and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn sleeps_of(&self, duration: Duration) -> usize {
        self.sleeps().iter().filter(|d| **d == duration).count()
    }
}

#[async_trait]
impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// A call made on [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    MoveTo(Anchor),
    Click,
    TypeChar(char),
    TapKey(Key),
    Focus(String),
}

/// Driver that records every call and can be told to fail on the n-th one.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub calls: Vec<DriverCall>,
    /// Zero-based index of the call that fails.
    pub fail_at: Option<usize>,
    /// Fail every focus request, as on a machine without the target window.
    pub focus_fails: bool,
}

impl RecordingDriver {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    fn record(&mut self, call: DriverCall) -> Result<()> {
        let index = self.calls.len();
        self.calls.push(call);
        if self.fail_at == Some(index) {
            return Err(Error::injection("simulated injection failure"));
        }
        Ok(())
    }

    /// Anchors moved to, in order.
    pub fn moves(&self) -> Vec<Anchor> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DriverCall::MoveTo(at) => Some(*at),
                _ => None,
            })
            .collect()
    }

    /// Every character typed, concatenated.
    pub fn typed(&self) -> String {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DriverCall::TypeChar(ch) => Some(*ch),
                _ => None,
            })
            .collect()
    }

    pub fn clicks(&self) -> usize {
        self.calls.iter().filter(|c| **c == DriverCall::Click).count()
    }
}

impl InputDriver for RecordingDriver {
    fn move_to(&mut self, at: Anchor) -> Result<()> {
        self.record(DriverCall::MoveTo(at))
    }

    fn click(&mut self) -> Result<()> {
        self.record(DriverCall::Click)
    }

    fn type_char(&mut self, c: char) -> Result<()> {
        self.record(DriverCall::TypeChar(c))
    }

    fn tap_key(&mut self, key: Key) -> Result<()> {
        self.record(DriverCall::TapKey(key))
    }

    fn focus_window(&mut self, window: &str) -> Result<()> {
        self.record(DriverCall::Focus(window.to_string()))?;
        if self.focus_fails {
            return Err(Error::injection("no such window"));
        }
        Ok(())
    }
}

/// Event source replaying a fixed script. `None` entries are empty polls.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    pub pending: VecDeque<Option<InputEvent>>,
    pub starts: usize,
    pub stops: usize,
    pub running: bool,
    pub fail_start: bool,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = Option<InputEvent>>) -> Self {
        Self {
            pending: events.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for ScriptedEvents {
    fn start(&mut self) -> Result<()> {
        if self.fail_start {
            return Err(Error::listener("hooks unavailable"));
        }
        self.starts += 1;
        self.running = true;
        Ok(())
    }

    fn try_next(&mut self) -> Option<InputEvent> {
        assert!(self.running, "polled a stopped listener");
        self.pending.pop_front().flatten()
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.running = false;
    }
}

/// A map with a distinct anchor for every label in the recording script.
pub fn sample_positions() -> CoordinateMap {
    RECORDING_SCRIPT
        .iter()
        .enumerate()
        .map(|(i, step)| (step.label, Anchor::new(100 + i as i32 * 10, 200 + i as i32)))
        .collect()
}

/// Stocks, roth, AAPL, buy 10 at market.
pub fn market_buy() -> TradeParams {
    TradeParams {
        account: Some("roth".to_string()),
        ticker: Some("AAPL".to_string()),
        action: Some("buy".to_string()),
        amount: Some(dec!(10)),
        order_type: Some("market".to_string()),
        ..TradeParams::default()
    }
}
