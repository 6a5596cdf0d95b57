//! Whole-row selection over the multi-cell manager.
//!
//! Owns a `MultiCellManager` and post-processes everything it returns:
//! every region is stretched across the full selectable column span and the
//! primary coordinate is re-marked as row-header-originated. Purely
//! horizontal navigation (left/right arrows, tab) does not apply in row
//! mode and is filtered out before delegation.

use crate::input::{Direction, SelectionInput};
use crate::manager::{common, MultiCellManager, StateManager};
use crate::shape::GridShape;
use crate::state::SelectionState;

pub struct MultiRowManager<S: GridShape> {
    inner: MultiCellManager<S>,
}

impl<S: GridShape> MultiRowManager<S> {
    pub fn new(shape: S) -> Self {
        Self {
            inner: MultiCellManager::new(shape),
        }
    }

    fn expand(&self, mut state: SelectionState) -> SelectionState {
        let shape = self.inner.shape();
        for region in &mut state.selections {
            *region = common::expand_to_row_selection(shape, region);
        }
        if let Some(fill) = state.fill.as_mut() {
            *fill = common::expand_to_row_selection(shape, fill);
        }
        if !state.primary.column_header {
            state.primary = state.primary.as_row_header();
        }
        state
    }
}

impl<S: GridShape> StateManager for MultiRowManager<S> {
    fn apply(&self, prev: &SelectionState, input: &SelectionInput) -> Option<SelectionState> {
        match input {
            SelectionInput::Arrow(Direction::Left | Direction::Right, _)
            | SelectionInput::Tab { .. } => return None,
            _ => {}
        }
        self.inner.apply(prev, input).map(|next| self.expand(next))
    }
}
