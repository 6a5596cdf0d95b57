//! Transitions and geometry helpers shared across manager variants.
//!
//! These are mode-independent pieces every cell-addressable variant calls
//! into: edit entry/exit, fill start/finish, tab-order traversal, selectable
//! column stepping, and row expansion for the row-selection modes.

use crate::coordinate::Coordinate;
use crate::region::Region;
use crate::shape::GridShape;
use crate::state::{InteractionMode, SelectionState};

/// True once the grid has any committed selection.
pub fn has_selection(prev: &SelectionState) -> bool {
    prev.mode != InteractionMode::None && !prev.selections.is_empty()
}

/// Cancel key: leave edit mode, keep the selection.
pub fn cancel(prev: &SelectionState) -> Option<SelectionState> {
    if prev.mode != InteractionMode::Edit {
        return None;
    }
    let mut next = prev.clone();
    next.mode = InteractionMode::Select;
    Some(next)
}

/// Edit key or printable character: open the primary cell's editor.
pub fn enter_edit<S: GridShape + ?Sized>(shape: &S, prev: &SelectionState) -> Option<SelectionState> {
    if prev.mode != InteractionMode::Select || !shape.is_cell_editable(prev.primary) {
        return None;
    }
    let mut next = prev.clone();
    next.mode = InteractionMode::Edit;
    Some(next)
}

/// Mouse released over a cell: finish the drag. Lands in edit mode when the
/// caller asks for it and the primary cell's editor opens on click.
pub fn cell_mouse_up<S: GridShape + ?Sized>(
    shape: &S,
    prev: &SelectionState,
    open_editor: bool,
) -> Option<SelectionState> {
    if prev.mode != InteractionMode::Selecting {
        return None;
    }
    let mut next = prev.clone();
    next.mode = if open_editor && shape.is_cell_editable(prev.primary) {
        InteractionMode::Edit
    } else {
        InteractionMode::Select
    };
    Some(next)
}

/// Mouse pressed on the fill handle: start projecting the active region.
pub fn fill_mouse_down(prev: &SelectionState) -> Option<SelectionState> {
    match prev.mode {
        InteractionMode::Select | InteractionMode::Edit if !prev.selections.is_empty() => {
            let mut next = prev.clone();
            next.mode = InteractionMode::Filling;
            next.fill = None;
            Some(next)
        }
        _ => None,
    }
}

/// Fill handle released: absorb the pending fill strip into the active
/// region and return to a committed selection.
pub fn fill_mouse_up(prev: &SelectionState) -> Option<SelectionState> {
    if prev.mode != InteractionMode::Filling {
        return None;
    }
    let mut next = prev.clone();
    if let Some(fill) = next.fill.take() {
        if let Some(active) = next.selections.last_mut() {
            *active = active.merge(&fill);
        }
    }
    next.mode = InteractionMode::Select;
    Some(next)
}

/// Stretch a region's columns across the full selectable span. Used by the
/// row-selection modes on every committed region.
pub fn expand_to_row_selection<S: GridShape + ?Sized>(shape: &S, region: &Region) -> Region {
    let mut primary = region.primary;
    primary.col = shape.min_selectable_col();
    let mut secondary = region.secondary;
    secondary.col = shape.max_selectable_col();
    Region::new(primary, secondary)
}

/// Next selectable column strictly after `col`.
pub fn next_selectable_col<S: GridShape + ?Sized>(shape: &S, col: i32) -> Option<i32> {
    ((col + 1)..=shape.max_selectable_col()).find(|c| shape.is_column_selectable(*c))
}

/// Previous selectable column strictly before `col`.
pub fn prev_selectable_col<S: GridShape + ?Sized>(shape: &S, col: i32) -> Option<i32> {
    (shape.min_selectable_col()..col)
        .rev()
        .find(|c| shape.is_column_selectable(*c))
}

/// Tab order: along the row through selectable columns, then the first
/// selectable column of the next row. The column header row comes first and
/// wraps into row 0; the last data row does not wrap.
pub fn next_tab_cell<S: GridShape + ?Sized>(shape: &S, from: Coordinate) -> Option<Coordinate> {
    if from.in_header_row() {
        return match next_selectable_col(shape, from.col) {
            Some(c) => Some(Coordinate::header(c)),
            None => Some(shape.mapped_cell(Coordinate::cell(0, shape.min_selectable_col()))),
        };
    }
    match next_selectable_col(shape, from.col) {
        Some(c) => Some(shape.mapped_cell(Coordinate::cell(from.row, c))),
        None => {
            let next_row = from.row + 1;
            if next_row > shape.max_row() {
                None
            } else {
                Some(shape.mapped_cell(Coordinate::cell(next_row, shape.min_selectable_col())))
            }
        }
    }
}

/// Reverse tab order; stops before the first header (or data, when headers
/// are hidden) cell.
pub fn prev_tab_cell<S: GridShape + ?Sized>(shape: &S, from: Coordinate) -> Option<Coordinate> {
    if from.in_header_row() {
        return prev_selectable_col(shape, from.col).map(Coordinate::header);
    }
    match prev_selectable_col(shape, from.col) {
        Some(c) => Some(shape.mapped_cell(Coordinate::cell(from.row, c))),
        None => {
            if from.row == 0 {
                if shape.column_header_hidden() {
                    None
                } else {
                    Some(Coordinate::header(shape.max_selectable_col()))
                }
            } else {
                Some(shape.mapped_cell(Coordinate::cell(from.row - 1, shape.max_selectable_col())))
            }
        }
    }
}

/// One row up for arrow navigation, crossing into the header row from row 0
/// when headers are shown. Lands on span owners.
pub fn step_up<S: GridShape + ?Sized>(shape: &S, coord: Coordinate) -> Option<Coordinate> {
    if coord.in_header_row() {
        return None;
    }
    let cur = shape.mapped_cell(coord);
    if cur.row <= 0 {
        if shape.column_header_hidden() {
            None
        } else {
            Some(Coordinate::header(cur.col))
        }
    } else {
        Some(shape.mapped_cell(Coordinate::cell(cur.row - 1, cur.col)))
    }
}

/// One row down for arrow navigation: from the header row into row 0, and
/// past the full height of a spanning cell otherwise.
pub fn step_down<S: GridShape + ?Sized>(shape: &S, coord: Coordinate) -> Option<Coordinate> {
    if coord.in_header_row() {
        return Some(shape.mapped_cell(Coordinate::cell(0, coord.col)));
    }
    let cur = shape.mapped_cell(coord);
    let next_row = cur.row + crate::region::checked_span(shape, cur);
    if next_row > shape.max_row() {
        None
    } else {
        Some(shape.mapped_cell(Coordinate::cell(next_row, cur.col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::TestGrid;

    #[test]
    fn test_cancel_only_leaves_edit() {
        let editing = SelectionState {
            mode: InteractionMode::Edit,
            ..SelectionState::single(Coordinate::cell(1, 1), InteractionMode::Edit)
        };
        assert_eq!(cancel(&editing).unwrap().mode, InteractionMode::Select);

        let selected = SelectionState::single(Coordinate::cell(1, 1), InteractionMode::Select);
        assert!(cancel(&selected).is_none());
    }

    #[test]
    fn test_enter_edit_requires_editable_cell() {
        let grid = TestGrid::plain(5, 4).with_readonly_col(2);

        let on_editable = SelectionState::single(Coordinate::cell(1, 1), InteractionMode::Select);
        assert_eq!(
            enter_edit(&grid, &on_editable).unwrap().mode,
            InteractionMode::Edit
        );

        let on_readonly = SelectionState::single(Coordinate::cell(1, 2), InteractionMode::Select);
        assert!(enter_edit(&grid, &on_readonly).is_none());
    }

    #[test]
    fn test_fill_round_trip_merges() {
        let region = Region::new(Coordinate::cell(2, 1), Coordinate::cell(2, 3));
        let mut state = SelectionState::single(Coordinate::cell(2, 1), InteractionMode::Select);
        state.selections = vec![region];

        let filling = fill_mouse_down(&state).unwrap();
        assert_eq!(filling.mode, InteractionMode::Filling);

        let mut with_fill = filling.clone();
        with_fill.fill = region.fill_region(Coordinate::cell(5, 2));

        let done = fill_mouse_up(&with_fill).unwrap();
        assert_eq!(done.mode, InteractionMode::Select);
        assert!(done.fill.is_none());
        assert_eq!(
            done.selections[0],
            Region::new(Coordinate::cell(2, 1), Coordinate::cell(5, 3))
        );
    }

    #[test]
    fn test_fill_mouse_down_needs_committed_selection() {
        assert!(fill_mouse_down(&SelectionState::empty()).is_none());

        let selecting = SelectionState::single(Coordinate::cell(1, 1), InteractionMode::Selecting);
        assert!(fill_mouse_down(&selecting).is_none());
    }

    #[test]
    fn test_tab_walks_row_then_wraps() {
        let grid = TestGrid::plain(3, 3);

        assert_eq!(
            next_tab_cell(&grid, Coordinate::cell(0, 0)),
            Some(Coordinate::cell(0, 1))
        );
        assert_eq!(
            next_tab_cell(&grid, Coordinate::cell(0, 2)),
            Some(Coordinate::cell(1, 0))
        );
        assert_eq!(next_tab_cell(&grid, Coordinate::cell(2, 2)), None);
    }

    #[test]
    fn test_tab_from_header_wraps_into_data() {
        let grid = TestGrid::plain(3, 3);

        assert_eq!(
            next_tab_cell(&grid, Coordinate::header(1)),
            Some(Coordinate::header(2))
        );
        assert_eq!(
            next_tab_cell(&grid, Coordinate::header(2)),
            Some(Coordinate::cell(0, 0))
        );
    }

    #[test]
    fn test_tab_skips_disabled_columns() {
        let grid = TestGrid::plain(3, 4).with_disabled_col(1);
        assert_eq!(
            next_tab_cell(&grid, Coordinate::cell(0, 0)),
            Some(Coordinate::cell(0, 2))
        );
    }

    #[test]
    fn test_prev_tab_crosses_back_into_header() {
        let grid = TestGrid::plain(3, 3);

        assert_eq!(
            prev_tab_cell(&grid, Coordinate::cell(0, 0)),
            Some(Coordinate::header(2))
        );
        assert_eq!(prev_tab_cell(&grid, Coordinate::header(0)), None);
        assert_eq!(
            prev_tab_cell(&grid, Coordinate::cell(1, 0)),
            Some(Coordinate::cell(0, 2))
        );
    }

    #[test]
    fn test_prev_tab_stops_at_first_cell_when_header_hidden() {
        let grid = TestGrid::plain(3, 3).with_hidden_header();
        assert_eq!(prev_tab_cell(&grid, Coordinate::cell(0, 0)), None);
    }

    #[test]
    fn test_step_down_skips_span() {
        let grid = TestGrid::plain(10, 3).with_span(2, 1, 3);
        assert_eq!(
            step_down(&grid, Coordinate::cell(2, 1)),
            Some(Coordinate::cell(5, 1))
        );
        assert_eq!(
            step_down(&grid, Coordinate::cell(2, 0)),
            Some(Coordinate::cell(3, 0))
        );
    }

    #[test]
    fn test_step_up_lands_on_span_owner() {
        let grid = TestGrid::plain(10, 3).with_span(2, 1, 3);
        assert_eq!(
            step_up(&grid, Coordinate::cell(5, 1)),
            Some(Coordinate::cell(2, 1))
        );
    }

    #[test]
    fn test_step_up_crosses_into_header() {
        let grid = TestGrid::plain(10, 3);
        assert_eq!(
            step_up(&grid, Coordinate::cell(0, 2)),
            Some(Coordinate::header(2))
        );
        assert_eq!(step_up(&grid, Coordinate::header(2)), None);

        let hidden = TestGrid::plain(10, 3).with_hidden_header();
        assert_eq!(step_up(&hidden, Coordinate::cell(0, 2)), None);
    }

    #[test]
    fn test_expand_to_row_selection() {
        let grid = TestGrid::plain(5, 6).with_disabled_col(0).with_disabled_col(5);
        let region = Region::new(Coordinate::cell(1, 2), Coordinate::cell(3, 2));
        let expanded = expand_to_row_selection(&grid, &region);
        assert_eq!(expanded.col_range().start, 1);
        assert_eq!(expanded.col_range().end, 4);
        assert_eq!(expanded.row_range().start, 1);
        assert_eq!(expanded.row_range().end, 3);
    }
}
