//! Multi-cell selection: arbitrarily many rectangular regions.
//!
//! The broadest variant; the row modes and the single-selection wrapper are
//! all built on top of it. Handles the full input set: focus, edit entry,
//! enter/tab traversal, the home/end and arrow families with their modifier
//! combinations, drag selection, ctrl-click disjoint regions, and the fill
//! handle.

use crate::coordinate::Coordinate;
use crate::input::{Direction, Modifiers, SelectionInput};
use crate::manager::{common, StateManager};
use crate::region::Region;
use crate::shape::GridShape;
use crate::state::{InteractionMode, SelectionState};

pub struct MultiCellManager<S: GridShape> {
    shape: S,
}

impl<S: GridShape> MultiCellManager<S> {
    pub fn new(shape: S) -> Self {
        Self { shape }
    }

    pub(crate) fn shape(&self) -> &S {
        &self.shape
    }

    /// First focus lands on the first selectable column's header cell, or
    /// its first data cell when the header row is hidden.
    fn on_focus(&self, prev: &SelectionState) -> Option<SelectionState> {
        if prev.mode != InteractionMode::None {
            return None;
        }
        let col = self.shape.min_selectable_col();
        let primary = if self.shape.column_header_hidden() {
            self.shape.mapped_cell(Coordinate::cell(0, col))
        } else {
            Coordinate::header(col)
        };
        Some(SelectionState::single(primary, InteractionMode::Select))
    }

    /// Enter moves the primary down past its own row span; shift+enter moves
    /// it up one row. At the grid boundary an open editor closes without
    /// moving.
    fn on_enter(&self, prev: &SelectionState, shift: bool) -> Option<SelectionState> {
        if !common::has_selection(prev) {
            return None;
        }
        let shape = &self.shape;
        let cur = shape.mapped_cell(prev.primary);

        let next = if shift {
            if cur.in_header_row() || cur.row == 0 {
                None
            } else {
                Some(shape.mapped_cell(Coordinate::cell(cur.row - 1, cur.col)))
            }
        } else if cur.in_header_row() {
            Some(shape.mapped_cell(Coordinate::cell(0, cur.col)))
        } else {
            let next_row = cur.row + crate::region::checked_span(shape, cur);
            if next_row > shape.max_row() {
                None
            } else {
                Some(shape.mapped_cell(Coordinate::cell(next_row, cur.col)))
            }
        };

        match next {
            Some(p) => Some(SelectionState::single(p, InteractionMode::Select)),
            None => self.exit_edit_at_boundary(prev),
        }
    }

    fn on_tab(&self, prev: &SelectionState, shift: bool) -> Option<SelectionState> {
        if !common::has_selection(prev) {
            return None;
        }
        let next = if shift {
            common::prev_tab_cell(&self.shape, prev.primary)
        } else {
            common::next_tab_cell(&self.shape, prev.primary)
        };
        match next {
            Some(p) => Some(SelectionState::single(p, InteractionMode::Select)),
            None => self.exit_edit_at_boundary(prev),
        }
    }

    fn exit_edit_at_boundary(&self, prev: &SelectionState) -> Option<SelectionState> {
        if prev.mode != InteractionMode::Edit {
            return None;
        }
        let mut next = prev.clone();
        next.mode = InteractionMode::Select;
        Some(next)
    }

    /// Home/End family. Without shift the primary moves to the row start or
    /// end (with ctrl: the grid start or end) and the selection collapses.
    /// With shift only the secondary corner of a sole region moves, followed
    /// by rectangularization.
    fn on_edge(&self, prev: &SelectionState, mods: Modifiers, to_end: bool) -> Option<SelectionState> {
        if !common::has_selection(prev) {
            return None;
        }
        let shape = &self.shape;
        let col = if to_end {
            shape.max_selectable_col()
        } else {
            shape.min_selectable_col()
        };

        if mods.shift {
            if prev.selections.len() != 1 {
                return None;
            }
            let region = prev.selections[0];
            let mut sec = region.secondary;
            sec.col = col;
            if mods.ctrl {
                sec.row = if to_end { shape.max_row() } else { 0 };
            }
            let next_region = region.with_secondary(sec).rectangularized(shape, true);
            let mut next = prev.clone();
            next.selections = vec![next_region];
            return Some(next);
        }

        let primary = if mods.ctrl {
            let row = if to_end { shape.max_row() } else { 0 };
            shape.mapped_cell(Coordinate::cell(row, col))
        } else if prev.primary.in_header_row() {
            Coordinate::header(col)
        } else {
            shape.mapped_cell(Coordinate::cell(prev.primary.row, col))
        };
        Some(SelectionState::single(primary, InteractionMode::Select))
    }

    fn on_arrow(
        &self,
        prev: &SelectionState,
        dir: Direction,
        mods: Modifiers,
    ) -> Option<SelectionState> {
        if !common::has_selection(prev) {
            return None;
        }
        match (mods.ctrl, mods.shift) {
            (false, false) => self.move_primary(prev, dir),
            (true, false) => self.jump_primary(prev, dir),
            (false, true) => self.extend_secondary(prev, dir, false),
            (true, true) => self.extend_secondary(prev, dir, true),
        }
    }

    /// Plain arrow: one step, collapsing to a single cell. Up/Down cross the
    /// header/data boundary at row 0; Left/Right walk selectable columns.
    fn move_primary(&self, prev: &SelectionState, dir: Direction) -> Option<SelectionState> {
        let shape = &self.shape;
        let p = prev.primary;
        let next = match dir {
            Direction::Up => common::step_up(shape, p),
            Direction::Down => common::step_down(shape, p),
            Direction::Left => common::prev_selectable_col(shape, p.col)
                .map(|c| self.horizontal_target(p, c)),
            Direction::Right => common::next_selectable_col(shape, p.col)
                .map(|c| self.horizontal_target(p, c)),
        }?;
        Some(SelectionState::single(next, InteractionMode::Select))
    }

    fn horizontal_target(&self, from: Coordinate, col: i32) -> Coordinate {
        if from.in_header_row() {
            Coordinate::header(col)
        } else {
            self.shape.mapped_cell(Coordinate::cell(from.row, col))
        }
    }

    /// Ctrl+arrow: jump the primary to the row or column extreme.
    fn jump_primary(&self, prev: &SelectionState, dir: Direction) -> Option<SelectionState> {
        let shape = &self.shape;
        let p = prev.primary;
        let next = match dir {
            Direction::Up => shape.mapped_cell(Coordinate::cell(0, p.col)),
            Direction::Down => shape.mapped_cell(Coordinate::cell(shape.max_row(), p.col)),
            Direction::Left => self.horizontal_target(p, shape.min_selectable_col()),
            Direction::Right => self.horizontal_target(p, shape.max_selectable_col()),
        };
        Some(SelectionState::single(next, InteractionMode::Select))
    }

    /// Shift+arrow: move the live region's free corner one step (or to the
    /// extreme with ctrl), then rectangularize — expanding when the corner
    /// moves away from the anchor, retracting when it moves toward it.
    fn extend_secondary(
        &self,
        prev: &SelectionState,
        dir: Direction,
        jump: bool,
    ) -> Option<SelectionState> {
        let shape = &self.shape;
        let region = *prev.active_region()?;
        let sec = region.secondary;

        let new_sec = match dir {
            Direction::Up => {
                let row = if jump { 0 } else { sec.row - 1 };
                if row < 0 {
                    return None;
                }
                Coordinate::cell(row, sec.col)
            }
            Direction::Down => {
                let row = if jump { shape.max_row() } else { sec.row + 1 };
                if row > shape.max_row() {
                    return None;
                }
                Coordinate::cell(row, sec.col)
            }
            Direction::Left => {
                let col = if jump {
                    shape.min_selectable_col()
                } else {
                    common::prev_selectable_col(shape, sec.col)?
                };
                Coordinate::cell(sec.row, col)
            }
            Direction::Right => {
                let col = if jump {
                    shape.max_selectable_col()
                } else {
                    common::next_selectable_col(shape, sec.col)?
                };
                Coordinate::cell(sec.row, col)
            }
        };

        let anchor = region.primary;
        let add = match dir {
            Direction::Up | Direction::Down => {
                (new_sec.row - anchor.row).abs() >= (sec.row - anchor.row).abs()
            }
            Direction::Left | Direction::Right => {
                (new_sec.col - anchor.col).abs() >= (sec.col - anchor.col).abs()
            }
        };

        let next_region = region.with_secondary(new_sec).rectangularized(shape, add);
        let mut next = prev.clone();
        if let Some(last) = next.selections.last_mut() {
            *last = next_region;
        }
        Some(next)
    }

    fn on_mouse_down(
        &self,
        prev: &SelectionState,
        target: Coordinate,
        mods: Modifiers,
    ) -> Option<SelectionState> {
        if mods.ctrl {
            return self.add_region(prev, target);
        }
        if mods.shift {
            return self.extend_active(prev, target, true);
        }

        let shape = &self.shape;
        if !shape.is_column_selectable(target.col) {
            return None;
        }
        if target.column_header {
            return Some(SelectionState::single(target, InteractionMode::Select));
        }
        let mut p = shape.mapped_cell(target);
        if target.row_header {
            p = p.as_row_header();
        }
        Some(SelectionState::single(p, InteractionMode::Selecting))
    }

    /// Ctrl+mouse-down: append a fresh single-cell region with a new anchor,
    /// unless the cell already lies inside a committed region.
    fn add_region(&self, prev: &SelectionState, target: Coordinate) -> Option<SelectionState> {
        let shape = &self.shape;
        if target.column_header || !shape.is_column_selectable(target.col) {
            return None;
        }
        let mut p = shape.mapped_cell(target);
        if target.row_header {
            p = p.as_row_header();
        }
        if prev.selections.iter().any(|r| r.contains(p)) {
            return None;
        }

        let mut next = prev.clone();
        next.mode = InteractionMode::Selecting;
        next.primary = p;
        next.selections.push(Region::cell(p));
        next.fill = None;
        Some(next)
    }

    /// Shift+mouse-down or drag mouse-enter: stretch the live region to the
    /// target and rectangularize; refused when the result would overlap
    /// another committed region.
    fn extend_active(
        &self,
        prev: &SelectionState,
        target: Coordinate,
        from_mouse_down: bool,
    ) -> Option<SelectionState> {
        let applicable = if from_mouse_down {
            matches!(
                prev.mode,
                InteractionMode::Select | InteractionMode::Selecting
            )
        } else {
            prev.mode == InteractionMode::Selecting
        };
        if !applicable {
            return None;
        }

        let shape = &self.shape;
        if target.column_header || !shape.is_column_selectable(target.col) {
            return None;
        }

        let region = *prev.active_region()?;
        let t = shape.mapped_cell(target);
        let next_region = region.with_secondary(t).rectangularized(shape, true);

        let committed = &prev.selections[..prev.selections.len() - 1];
        if committed.iter().any(|r| next_region.overlaps(r)) {
            return None;
        }
        if next_region == region && prev.mode == InteractionMode::Selecting {
            return None;
        }

        let mut next = prev.clone();
        if let Some(last) = next.selections.last_mut() {
            *last = next_region;
        }
        next.mode = InteractionMode::Selecting;
        Some(next)
    }

    fn on_mouse_enter(&self, prev: &SelectionState, target: Coordinate) -> Option<SelectionState> {
        match prev.mode {
            InteractionMode::Selecting => self.extend_active(prev, target, false),
            InteractionMode::Filling => self.on_fill_enter(prev, target),
            _ => None,
        }
    }

    /// Recompute the fill projection against the active region; emits only
    /// when the strip actually changed.
    fn on_fill_enter(&self, prev: &SelectionState, target: Coordinate) -> Option<SelectionState> {
        if prev.mode != InteractionMode::Filling {
            return None;
        }
        let region = prev.active_region()?;
        let new_fill = region.fill_region(target);
        if new_fill == prev.fill {
            return None;
        }
        let mut next = prev.clone();
        next.fill = new_fill;
        Some(next)
    }

    /// Right-click collapses onto the clicked cell unless it is already the
    /// primary one, so a context menu never loses its target.
    fn on_right_click(&self, prev: &SelectionState, target: Coordinate) -> Option<SelectionState> {
        let shape = &self.shape;
        if target.column_header || !shape.is_column_selectable(target.col) {
            return None;
        }
        let p = shape.mapped_cell(target);
        if p == prev.primary {
            return None;
        }
        Some(SelectionState::single(p, InteractionMode::Select))
    }
}

impl<S: GridShape> StateManager for MultiCellManager<S> {
    fn apply(&self, prev: &SelectionState, input: &SelectionInput) -> Option<SelectionState> {
        match *input {
            SelectionInput::Focus => self.on_focus(prev),
            SelectionInput::Cancel => common::cancel(prev),
            SelectionInput::EditKey | SelectionInput::CharKey => {
                common::enter_edit(&self.shape, prev)
            }
            SelectionInput::Enter { shift } => self.on_enter(prev, shift),
            SelectionInput::Tab { shift } => self.on_tab(prev, shift),
            SelectionInput::Home(mods) => self.on_edge(prev, mods, false),
            SelectionInput::End(mods) => self.on_edge(prev, mods, true),
            SelectionInput::Arrow(dir, mods) => self.on_arrow(prev, dir, mods),
            SelectionInput::CellMouseDown { target, mods } => {
                self.on_mouse_down(prev, target, mods)
            }
            SelectionInput::CellMouseUp { open_editor, .. } => {
                common::cell_mouse_up(&self.shape, prev, open_editor)
            }
            SelectionInput::CellMouseEnter { target } => self.on_mouse_enter(prev, target),
            SelectionInput::FillMouseDown { .. } => common::fill_mouse_down(prev),
            SelectionInput::FillMouseEnter { target } => self.on_fill_enter(prev, target),
            SelectionInput::FillMouseUp { .. } => common::fill_mouse_up(prev),
            SelectionInput::RightClick { target } => self.on_right_click(prev, target),
        }
    }
}
