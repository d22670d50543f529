//! Global input events for the position recorder.
//!
//! This module provides the event types the recorder consumes and the
//! [`EventSource`] seam over the OS-level listener.

mod input;
mod listener;

pub use input::Key;
pub use listener::GlobalListener;

use crate::error::Result;
use crate::positions::Anchor;

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(usize),
}

impl From<usize> for PointerButton {
    fn from(button: usize) -> Self {
        match button {
            1 => PointerButton::Left,
            2 => PointerButton::Right,
            3 => PointerButton::Middle,
            n => PointerButton::Other(n),
        }
    }
}

/// A global input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A pointer button went down; `at` is the pointer position at that moment.
    ButtonDown { button: PointerButton, at: Anchor },
    /// A key went down.
    KeyDown(Key),
}

impl InputEvent {
    /// Left button down at `at`.
    pub fn left_click(at: Anchor) -> Self {
        Self::ButtonDown {
            button: PointerButton::Left,
            at,
        }
    }

    /// The position of a left-button press.
    pub fn left_click_position(&self) -> Option<Anchor> {
        match self {
            Self::ButtonDown {
                button: PointerButton::Left,
                at,
            } => Some(*at),
            _ => None,
        }
    }

    /// Whether this is a key-down of `key`.
    pub fn is_key(&self, key: Key) -> bool {
        matches!(self, Self::KeyDown(k) if *k == key)
    }
}

/// A global listener the recorder owns for the length of a session.
pub trait EventSource {
    /// Begin capturing events.
    fn start(&mut self) -> Result<()>;

    /// Next captured event, if one is waiting. Never blocks.
    fn try_next(&mut self) -> Option<InputEvent>;

    /// Stop capturing and release OS hooks. Safe to call more than once.
    fn stop(&mut self);
}
