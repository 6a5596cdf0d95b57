//! Single-selection restriction wrapper.
//!
//! Wraps a broader manager and narrows it to one selection at a time:
//! extend inputs collapse to their move equivalents (shift is stripped from
//! the arrow and home/end families, ctrl/shift mouse-down downgrades to a
//! plain press), mouse-down lands directly in `Select` instead of starting
//! a drag, and at most one region survives. Wrapping the multi-cell manager
//! yields single-cell selection; wrapping the multi-row manager yields
//! single-row selection.

use crate::input::{Modifiers, SelectionInput};
use crate::manager::StateManager;
use crate::state::{InteractionMode, SelectionState};

pub struct Single<M: StateManager> {
    inner: M,
}

impl<M: StateManager> Single<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: StateManager> StateManager for Single<M> {
    fn apply(&self, prev: &SelectionState, input: &SelectionInput) -> Option<SelectionState> {
        let remapped = match *input {
            SelectionInput::Arrow(dir, mods) => SelectionInput::Arrow(
                dir,
                Modifiers {
                    shift: false,
                    ctrl: mods.ctrl,
                },
            ),
            SelectionInput::Home(mods) => SelectionInput::Home(Modifiers {
                shift: false,
                ctrl: mods.ctrl,
            }),
            SelectionInput::End(mods) => SelectionInput::End(Modifiers {
                shift: false,
                ctrl: mods.ctrl,
            }),
            SelectionInput::CellMouseDown { target, .. } => SelectionInput::CellMouseDown {
                target,
                mods: Modifiers::NONE,
            },
            other => other,
        };

        let mut next = self.inner.apply(prev, &remapped)?;
        if next.mode == InteractionMode::Selecting {
            next.mode = InteractionMode::Select;
        }
        if next.selections.len() > 1 {
            let newest = next.selections.pop();
            next.selections.clear();
            next.selections.extend(newest);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use crate::harness::TestGrid;
    use crate::input::Direction;
    use crate::manager::MultiCellManager;

    fn single_cell(grid: TestGrid) -> Single<MultiCellManager<TestGrid>> {
        Single::new(MultiCellManager::new(grid))
    }

    fn select(row: i32, col: i32) -> SelectionState {
        SelectionState::single(Coordinate::cell(row, col), InteractionMode::Select)
    }

    #[test]
    fn test_shift_arrow_behaves_like_plain_move() {
        let grid = TestGrid::plain(5, 4);
        let wrapped = single_cell(grid.clone());
        let plain = MultiCellManager::new(grid);

        let state = select(2, 1);
        let via_shift = wrapped
            .apply(&state, &SelectionInput::Arrow(Direction::Left, Modifiers::SHIFT))
            .unwrap();
        let via_move = plain
            .apply(&state, &SelectionInput::Arrow(Direction::Left, Modifiers::NONE))
            .unwrap();
        assert_eq!(via_shift, via_move);
        assert!(via_shift.selections[0].is_single_cell());
    }

    #[test]
    fn test_shift_home_behaves_like_home() {
        let grid = TestGrid::plain(5, 4);
        let wrapped = single_cell(grid.clone());
        let plain = MultiCellManager::new(grid);

        let state = select(2, 3);
        let via_shift = wrapped
            .apply(&state, &SelectionInput::Home(Modifiers::SHIFT))
            .unwrap();
        let via_move = plain
            .apply(&state, &SelectionInput::Home(Modifiers::NONE))
            .unwrap();
        assert_eq!(via_shift, via_move);
    }

    #[test]
    fn test_mouse_down_lands_in_select_mode() {
        let m = single_cell(TestGrid::plain(5, 4));
        let next = m
            .apply(
                &SelectionState::empty(),
                &SelectionInput::CellMouseDown {
                    target: Coordinate::cell(2, 2),
                    mods: Modifiers::NONE,
                },
            )
            .unwrap();
        assert_eq!(next.mode, InteractionMode::Select);
    }

    #[test]
    fn test_ctrl_click_replaces_instead_of_appending() {
        let m = single_cell(TestGrid::plain(6, 6));
        let first = m
            .apply(
                &SelectionState::empty(),
                &SelectionInput::CellMouseDown {
                    target: Coordinate::cell(1, 1),
                    mods: Modifiers::CTRL,
                },
            )
            .unwrap();
        let second = m
            .apply(
                &first,
                &SelectionInput::CellMouseDown {
                    target: Coordinate::cell(4, 4),
                    mods: Modifiers::CTRL,
                },
            )
            .unwrap();
        assert_eq!(second.selections.len(), 1);
        assert_eq!(second.primary, Coordinate::cell(4, 4));
    }

    #[test]
    fn test_drag_enter_does_not_extend() {
        let m = single_cell(TestGrid::plain(5, 4));
        let down = m
            .apply(
                &SelectionState::empty(),
                &SelectionInput::CellMouseDown {
                    target: Coordinate::cell(1, 1),
                    mods: Modifiers::NONE,
                },
            )
            .unwrap();
        // Mode is Select, so a drag-enter has nothing to extend.
        assert!(m
            .apply(
                &down,
                &SelectionInput::CellMouseEnter {
                    target: Coordinate::cell(3, 3),
                },
            )
            .is_none());
    }
}
