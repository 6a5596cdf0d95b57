//! Classified input events.
//!
//! The hosting layer turns raw keyboard/mouse events into these discrete
//! inputs before forwarding them to a state manager. Each variant is one
//! transition trigger; the manager decides whether it applies in the
//! current mode.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Modifier keys held for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true };
    pub const CTRL_SHIFT: Modifiers = Modifiers { shift: true, ctrl: true };
}

/// One classified input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput {
    /// The grid received keyboard focus.
    Focus,
    /// Escape: leave edit mode.
    Cancel,
    /// The edit key (F2): open the primary cell's editor.
    EditKey,
    /// A printable character was typed outside an editor.
    CharKey,
    Enter { shift: bool },
    Tab { shift: bool },
    Home(Modifiers),
    End(Modifiers),
    Arrow(Direction, Modifiers),
    CellMouseDown { target: Coordinate, mods: Modifiers },
    /// `open_editor` requests entering edit mode for cells whose editor
    /// opens in a callout on click.
    CellMouseUp { target: Coordinate, open_editor: bool },
    /// Pointer moved onto a cell while a drag (selection or fill) is live.
    CellMouseEnter { target: Coordinate },
    FillMouseDown { target: Coordinate },
    FillMouseEnter { target: Coordinate },
    FillMouseUp { target: Coordinate },
    RightClick { target: Coordinate },
}
