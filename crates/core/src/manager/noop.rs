//! Selection disabled: every input returns the no-transition sentinel.

use crate::input::SelectionInput;
use crate::manager::StateManager;
use crate::state::SelectionState;

pub struct NoopManager;

impl StateManager for NoopManager {
    fn apply(&self, _prev: &SelectionState, _input: &SelectionInput) -> Option<SelectionState> {
        None
    }
}
