// Keyboard input classification
//
// Turns raw key chords into the discrete selection inputs the state
// machine consumes. Defaults cover the full navigation set; users can
// rebind through keymap.toml in the platform config directory.

pub mod combo;
pub mod command;
pub mod error;
pub mod keymap;

pub use combo::{Key, KeyCombo};
pub use command::Command;
pub use error::KeymapError;
pub use keymap::Keymap;
