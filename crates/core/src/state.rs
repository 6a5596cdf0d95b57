//! Selection state and mode enumerations.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::region::Region;

/// Which selection behavior a grid is configured for. Drives the
/// [`state_manager`](crate::manager::state_manager) factory.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Selection disabled; every input is ignored.
    #[default]
    None,
    /// Exactly one cell at a time.
    SingleCell,
    /// Arbitrarily many rectangular cell regions.
    MultiCell,
    /// Exactly one whole row.
    SingleRow,
    /// One or more whole rows.
    MultiRow,
}

/// What the user is currently doing with the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Nothing selected yet
    #[default]
    None,
    /// A committed selection exists
    Select,
    /// Mouse drag in progress (between mouse-down and mouse-up)
    Selecting,
    /// The primary cell's editor is open
    Edit,
    /// Dragging the fill handle
    Filling,
}

/// The full selection state of one grid instance.
///
/// Owned by the hosting grid and replaced wholesale on every accepted
/// transition; the state machine never mutates a committed state in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub mode: InteractionMode,
    /// The active cell: drives editing and directional navigation.
    pub primary: Coordinate,
    /// Committed regions, insertion order = z-order. Holds more than one
    /// entry only under ctrl-click in multi-cell mode.
    pub selections: Vec<Region>,
    /// Pending fill projection; present only while `mode` is `Filling`.
    pub fill: Option<Region>,
}

impl SelectionState {
    /// The no-selection state a grid mounts with.
    pub fn empty() -> Self {
        Self {
            mode: InteractionMode::None,
            primary: Coordinate::cell(-1, -1),
            selections: Vec::new(),
            fill: None,
        }
    }

    /// A single-cell selection at `primary`.
    pub fn single(primary: Coordinate, mode: InteractionMode) -> Self {
        Self {
            mode,
            primary,
            selections: vec![Region::cell(primary)],
            fill: None,
        }
    }

    /// The region the next extend/fill transition operates on: the most
    /// recently committed one.
    pub fn active_region(&self) -> Option<&Region> {
        self.selections.last()
    }

    /// True if any committed region contains the coordinate. Render helper;
    /// the transition logic works on regions directly.
    pub fn is_selected(&self, coord: Coordinate) -> bool {
        self.selections.iter().any(|r| r.contains(coord))
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::empty()
    }
}
