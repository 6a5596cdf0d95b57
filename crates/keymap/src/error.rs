use std::fmt;

#[derive(Debug)]
pub enum KeymapError {
    /// A chord string was empty or had no key part.
    EmptyChord,
    /// Unrecognized key name in a chord.
    UnknownKey(String),
    /// Unrecognized modifier name in a chord.
    UnknownModifier(String),
    /// Unrecognized command name in a bindings file.
    UnknownCommand(String),
    /// Bindings file could not be read.
    Io(String),
    /// Bindings file is not valid TOML.
    Parse(String),
}

impl fmt::Display for KeymapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyChord => write!(f, "empty key chord"),
            Self::UnknownKey(key) => write!(f, "unknown key: '{key}'"),
            Self::UnknownModifier(m) => write!(f, "unknown modifier: '{m}'"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command: '{cmd}'"),
            Self::Io(msg) => write!(f, "keymap read error: {msg}"),
            Self::Parse(msg) => write!(f, "keymap parse error: {msg}"),
        }
    }
}

impl std::error::Error for KeymapError {}
