//! Key representation and key-binding parsing.

use device_query::Keycode;

/// Simplified key representation shared by the listener and the injector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl From<Keycode> for Key {
    fn from(code: Keycode) -> Self {
        match code {
            Keycode::Enter => Key::Enter,
            Keycode::Escape => Key::Escape,
            Keycode::Backspace => Key::Backspace,
            Keycode::Delete => Key::Delete,
            Keycode::Tab => Key::Tab,
            Keycode::Space => Key::Space,
            Keycode::Up => Key::Up,
            Keycode::Down => Key::Down,
            Keycode::Left => Key::Left,
            Keycode::Right => Key::Right,
            Keycode::Home => Key::Home,
            Keycode::End => Key::End,
            Keycode::PageUp => Key::PageUp,
            Keycode::PageDown => Key::PageDown,
            Keycode::F1 => Key::F(1),
            Keycode::F2 => Key::F(2),
            Keycode::F3 => Key::F(3),
            Keycode::F4 => Key::F(4),
            Keycode::F5 => Key::F(5),
            Keycode::F6 => Key::F(6),
            Keycode::F7 => Key::F(7),
            Keycode::F8 => Key::F(8),
            Keycode::F9 => Key::F(9),
            Keycode::F10 => Key::F(10),
            Keycode::F11 => Key::F(11),
            Keycode::F12 => Key::F(12),
            _ => Key::Char('\0'),
        }
    }
}

impl Key {
    /// Parse a binding string such as "Esc", "Enter" or "F2".
    ///
    /// Only keys the global listener reports are accepted.
    pub fn from_binding(binding: &str) -> Option<Self> {
        match binding.trim().to_lowercase().as_str() {
            "enter" | "return" => Some(Key::Enter),
            "esc" | "escape" => Some(Key::Escape),
            "backspace" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "tab" => Some(Key::Tab),
            "space" => Some(Key::Space),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "home" => Some(Key::Home),
            "end" => Some(Key::End),
            "pageup" => Some(Key::PageUp),
            "pagedown" => Some(Key::PageDown),
            s if s.starts_with('f') && s.len() <= 3 => match s[1..].parse::<u8>() {
                Ok(n @ 1..=12) => Some(Key::F(n)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Short name for prompts.
    pub fn label(&self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Enter => "ENTER".to_string(),
            Key::Escape => "ESC".to_string(),
            Key::Backspace => "BACKSPACE".to_string(),
            Key::Delete => "DELETE".to_string(),
            Key::Tab => "TAB".to_string(),
            Key::Space => "SPACE".to_string(),
            Key::Up => "UP".to_string(),
            Key::Down => "DOWN".to_string(),
            Key::Left => "LEFT".to_string(),
            Key::Right => "RIGHT".to_string(),
            Key::Home => "HOME".to_string(),
            Key::End => "END".to_string(),
            Key::PageUp => "PAGEUP".to_string(),
            Key::PageDown => "PAGEDOWN".to_string(),
            Key::F(n) => format!("F{n}"),
        }
    }
}
