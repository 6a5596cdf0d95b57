//! Selection state managers.
//!
//! Contains:
//! - The `StateManager` contract: one pure transition function per grid
//!   instance, `(previous state, input) -> Option<new state>`
//! - Transitions shared by every cell-addressable variant (`common`)
//! - The concrete variants: no-op, multi-cell, multi-row, and the
//!   single-selection restriction wrapper
//! - The `state_manager` factory selecting a variant per selection mode
//!
//! Restricting variants wrap their broader sibling and post-process its
//! results instead of subclassing it: single-cell wraps multi-cell,
//! multi-row wraps multi-cell, single-row wraps multi-row.

pub mod common;
pub mod multi_cell;
pub mod multi_row;
pub mod noop;
pub mod single;

pub use multi_cell::MultiCellManager;
pub use multi_row::MultiRowManager;
pub use noop::NoopManager;
pub use single::Single;

use crate::input::SelectionInput;
use crate::shape::GridShape;
use crate::state::{SelectionMode, SelectionState};

/// The selection transition function.
///
/// `apply` returns `Some(next)` when the input produces a transition and
/// `None` when it does not apply in the current mode. The host commits and
/// re-renders only on `Some`; `None` must be treated as a no-op, never as a
/// failure. Implementations are deterministic and side-effect-free.
pub trait StateManager {
    fn apply(&self, prev: &SelectionState, input: &SelectionInput) -> Option<SelectionState>;
}

/// Single-cell restriction over the multi-cell manager.
pub type SingleCellManager<S> = Single<MultiCellManager<S>>;

/// Single-row restriction over the multi-row manager.
pub type SingleRowManager<S> = Single<MultiRowManager<S>>;

/// Build the state manager for a selection mode. Unknown modes behave like
/// selection disabled.
pub fn state_manager<S: GridShape + 'static>(
    mode: SelectionMode,
    shape: S,
) -> Box<dyn StateManager> {
    match mode {
        SelectionMode::SingleCell => Box::new(Single::new(MultiCellManager::new(shape))),
        SelectionMode::MultiCell => Box::new(MultiCellManager::new(shape)),
        SelectionMode::SingleRow => Box::new(Single::new(MultiRowManager::new(shape))),
        SelectionMode::MultiRow => Box::new(MultiRowManager::new(shape)),
        _ => Box::new(NoopManager),
    }
}
