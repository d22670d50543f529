//! Input injection backed by enigo.

use super::InputDriver;
use crate::config::TargetConfig;
use crate::error::{Error, Result};
use crate::events::Key;
use crate::positions::Anchor;
use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse};
use std::process::Command;
use std::time::Duration;
use tracing::debug;

/// Pause between interpolated pointer positions.
const MOVE_STEP_PAUSE: Duration = Duration::from_millis(8);

/// Drives the real pointer and keyboard.
pub struct EnigoDriver {
    enigo: Enigo,
    smooth_move_steps: u32,
}

impl EnigoDriver {
    /// Connect to the platform input backend.
    pub fn new(target: &TargetConfig) -> Result<Self> {
        let enigo = Enigo::new(&enigo::Settings::default())
            .map_err(|e| Error::injection(format!("cannot connect to input backend: {e}")))?;

        Ok(Self {
            enigo,
            smooth_move_steps: target.smooth_move_steps.max(1),
        })
    }
}

fn injection(e: enigo::InputError) -> Error {
    Error::injection(e.to_string())
}

/// Smoothstep easing between two coordinates.
fn interpolate(from: i32, to: i32, step: u32, steps: u32) -> i32 {
    let t = f64::from(step) / f64::from(steps);
    let eased = t * t * (3.0 - 2.0 * t);
    from + (f64::from(to - from) * eased).round() as i32
}

fn to_enigo_key(key: Key) -> enigo::Key {
    match key {
        Key::Char(c) => enigo::Key::Unicode(c),
        Key::Enter => enigo::Key::Return,
        Key::Escape => enigo::Key::Escape,
        Key::Backspace => enigo::Key::Backspace,
        Key::Delete => enigo::Key::Delete,
        Key::Tab => enigo::Key::Tab,
        Key::Space => enigo::Key::Space,
        Key::Up => enigo::Key::UpArrow,
        Key::Down => enigo::Key::DownArrow,
        Key::Left => enigo::Key::LeftArrow,
        Key::Right => enigo::Key::RightArrow,
        Key::Home => enigo::Key::Home,
        Key::End => enigo::Key::End,
        Key::PageUp => enigo::Key::PageUp,
        Key::PageDown => enigo::Key::PageDown,
        Key::F(1) => enigo::Key::F1,
        Key::F(2) => enigo::Key::F2,
        Key::F(3) => enigo::Key::F3,
        Key::F(4) => enigo::Key::F4,
        Key::F(5) => enigo::Key::F5,
        Key::F(6) => enigo::Key::F6,
        Key::F(7) => enigo::Key::F7,
        Key::F(8) => enigo::Key::F8,
        Key::F(9) => enigo::Key::F9,
        Key::F(10) => enigo::Key::F10,
        Key::F(11) => enigo::Key::F11,
        Key::F(_) => enigo::Key::F12,
    }
}

impl InputDriver for EnigoDriver {
    fn move_to(&mut self, at: Anchor) -> Result<()> {
        let (from_x, from_y) = self.enigo.location().map_err(injection)?;
        let steps = self.smooth_move_steps;

        for step in 1..=steps {
            let x = interpolate(from_x, at.x, step, steps);
            let y = interpolate(from_y, at.y, step, steps);
            self.enigo
                .move_mouse(x, y, Coordinate::Abs)
                .map_err(injection)?;
            if step < steps {
                std::thread::sleep(MOVE_STEP_PAUSE);
            }
        }

        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(injection)
    }

    fn type_char(&mut self, c: char) -> Result<()> {
        self.enigo.text(&c.to_string()).map_err(injection)
    }

    fn tap_key(&mut self, key: Key) -> Result<()> {
        self.enigo
            .key(to_enigo_key(key), Direction::Click)
            .map_err(injection)
    }

    fn focus_window(&mut self, window: &str) -> Result<()> {
        let status = focus_command(window)
            .ok_or_else(|| Error::injection("window focus is not supported on this platform"))?
            .status()?;

        if status.success() {
            debug!("Focused window '{}'", window);
            Ok(())
        } else {
            Err(Error::injection(format!(
                "could not focus window '{window}' ({status})"
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn focus_command(window: &str) -> Option<Command> {
    let mut cmd = Command::new("osascript");
    cmd.arg("-e")
        .arg(format!("tell application \"{window}\" to activate"));
    Some(cmd)
}

#[cfg(target_os = "linux")]
fn focus_command(window: &str) -> Option<Command> {
    let mut cmd = Command::new("wmctrl");
    cmd.arg("-a").arg(window);
    Some(cmd)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn focus_command(_window: &str) -> Option<Command> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_ends_on_target() {
        assert_eq!(interpolate(0, 100, 12, 12), 100);
        assert_eq!(interpolate(500, -40, 12, 12), -40);
        assert_eq!(interpolate(0, 100, 0, 12), 0);
    }

    #[test]
    fn test_interpolate_is_monotonic() {
        let path: Vec<_> = (0..=12).map(|s| interpolate(10, 310, s, 12)).collect();
        assert!(path.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_confirm_key_is_return() {
        assert_eq!(to_enigo_key(Key::Enter), enigo::Key::Return);
        assert_eq!(to_enigo_key(Key::Char('a')), enigo::Key::Unicode('a'));
    }
}
