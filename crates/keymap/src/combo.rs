//! Key chords.
//!
//! A chord is a navigation key plus ctrl/shift modifiers, written
//! `"ctrl+shift+home"` style. Parsing normalizes case, whitespace, and the
//! common aliases (`esc`, `return`, `control`).

use std::fmt;

use spangrid_core::input::Modifiers;

use crate::error::KeymapError;

/// Keys the selection machine cares about. Printable characters are not
/// chords; hosts forward them as character presses directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Tab,
    Escape,
    F2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn mods(&self) -> Modifiers {
        Modifiers {
            shift: self.shift,
            ctrl: self.ctrl,
        }
    }

    /// Parse a `"ctrl+shift+home"` style chord.
    pub fn parse(raw: &str) -> Result<Self, KeymapError> {
        let mut parts: Vec<&str> = raw
            .split('+')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let key_part = parts.pop().ok_or(KeymapError::EmptyChord)?;

        let key = match key_part.to_ascii_lowercase().as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "escape" | "esc" => Key::Escape,
            "f2" => Key::F2,
            other => return Err(KeymapError::UnknownKey(other.to_string())),
        };

        let mut combo = KeyCombo::new(key);
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => combo.ctrl = true,
                "shift" => combo.shift = true,
                other => return Err(KeymapError::UnknownModifier(other.to_string())),
            }
        }
        Ok(combo)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        let key = match self.key {
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Home => "home",
            Key::End => "end",
            Key::Enter => "enter",
            Key::Tab => "tab",
            Key::Escape => "escape",
            Key::F2 => "f2",
        };
        write!(f, "{key}")
    }
}
