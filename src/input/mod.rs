//! Input injection.
//!
//! The sequencer only talks to an [`InputDriver`]; [`EnigoDriver`] is the
//! production implementation.

mod enigo_driver;

pub use enigo_driver::EnigoDriver;

use crate::error::Result;
use crate::events::Key;
use crate::positions::Anchor;

/// Synchronous input-injection primitives.
///
/// Each call either completes or reports an error; no call is retried.
#[cfg_attr(test, mockall::automock)]
pub trait InputDriver {
    /// Move the pointer smoothly to `at`.
    fn move_to(&mut self, at: Anchor) -> Result<()>;

    /// Click the primary button at the current pointer position.
    fn click(&mut self) -> Result<()>;

    /// Type a single character.
    fn type_char(&mut self, c: char) -> Result<()>;

    /// Tap a named key.
    fn tap_key(&mut self, key: Key) -> Result<()>;

    /// Ask the window manager to bring `window` forward.
    fn focus_window(&mut self, window: &str) -> Result<()>;
}
