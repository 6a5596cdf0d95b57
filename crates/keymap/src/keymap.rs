//! Binding table: chord -> command.
//!
//! Defaults cover the full navigation set. User overrides are merged from
//! `keymap.toml` in the platform config directory:
//!
//! ```toml
//! [bindings]
//! "ctrl+shift+home" = "extend_grid_start"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::combo::KeyCombo;
use crate::command::Command;
use crate::error::KeymapError;

/// Default chord table. Every entry must parse; see the defaults test.
const DEFAULT_BINDINGS: &[(&str, Command)] = &[
    ("escape", Command::Cancel),
    ("f2", Command::Edit),
    ("enter", Command::Advance),
    ("shift+enter", Command::AdvanceUp),
    ("tab", Command::NextCell),
    ("shift+tab", Command::PrevCell),
    ("up", Command::MoveUp),
    ("down", Command::MoveDown),
    ("left", Command::MoveLeft),
    ("right", Command::MoveRight),
    ("shift+up", Command::ExtendUp),
    ("shift+down", Command::ExtendDown),
    ("shift+left", Command::ExtendLeft),
    ("shift+right", Command::ExtendRight),
    ("ctrl+up", Command::JumpUp),
    ("ctrl+down", Command::JumpDown),
    ("ctrl+left", Command::JumpLeft),
    ("ctrl+right", Command::JumpRight),
    ("ctrl+shift+up", Command::ExtendJumpUp),
    ("ctrl+shift+down", Command::ExtendJumpDown),
    ("ctrl+shift+left", Command::ExtendJumpLeft),
    ("ctrl+shift+right", Command::ExtendJumpRight),
    ("home", Command::RowStart),
    ("end", Command::RowEnd),
    ("ctrl+home", Command::GridStart),
    ("ctrl+end", Command::GridEnd),
    ("shift+home", Command::ExtendRowStart),
    ("shift+end", Command::ExtendRowEnd),
    ("ctrl+shift+home", Command::ExtendGridStart),
    ("ctrl+shift+end", Command::ExtendGridEnd),
];

#[derive(Debug, Deserialize)]
struct KeymapFile {
    #[serde(default)]
    bindings: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyCombo, Command>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut bindings = HashMap::with_capacity(DEFAULT_BINDINGS.len());
        for (chord, command) in DEFAULT_BINDINGS {
            if let Ok(combo) = KeyCombo::parse(chord) {
                bindings.insert(combo, *command);
            }
        }
        Self { bindings }
    }
}

impl Keymap {
    /// Defaults merged with the user's `keymap.toml`, when one exists.
    pub fn load() -> Result<Self, KeymapError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Defaults merged with the bindings in `path`.
    pub fn load_from(path: &Path) -> Result<Self, KeymapError> {
        let contents = fs::read_to_string(path).map_err(|e| KeymapError::Io(e.to_string()))?;
        let file: KeymapFile =
            toml::from_str(&contents).map_err(|e| KeymapError::Parse(e.to_string()))?;

        let mut keymap = Self::default();
        for (chord, command) in &file.bindings {
            let combo = KeyCombo::parse(chord)?;
            keymap.bindings.insert(combo, Command::parse(command)?);
        }
        Ok(keymap)
    }

    /// `<config dir>/spangrid/keymap.toml`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("spangrid").join("keymap.toml"))
    }

    pub fn resolve(&self, combo: KeyCombo) -> Option<Command> {
        self.bindings.get(&combo).copied()
    }

    pub fn bind(&mut self, combo: KeyCombo, command: Command) {
        self.bindings.insert(combo, command);
    }

    /// The chord currently bound to a command, for display in help text.
    pub fn chord_for(&self, command: Command) -> Option<KeyCombo> {
        self.bindings
            .iter()
            .find(|(_, cmd)| **cmd == command)
            .map(|(combo, _)| *combo)
    }
}
