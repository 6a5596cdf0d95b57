//! Host application state and event translation.
//!
//! Owns the single committed `SelectionState`, classifies crossterm events
//! into selection inputs (keyboard through the keymap, mouse through a cell
//! hit test with a fill-handle corner), and commits a new state only when
//! the manager returns one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use spangrid_core::coordinate::Coordinate;
use spangrid_core::input::{Modifiers, SelectionInput};
use spangrid_core::manager::{state_manager, StateManager};
use spangrid_core::shape::GridShape;
use spangrid_core::state::{InteractionMode, SelectionMode, SelectionState};
use spangrid_keymap::{Key, KeyCombo, Keymap};

use crate::model::SharedModel;

/// Width of the row-number gutter.
pub const GUTTER_WIDTH: u16 = 5;
/// Rendered cell width including the trailing separator space.
pub const CELL_WIDTH: u16 = 10;
/// Chrome above the data rows: title line + sticky header line.
pub const HEADER_LINES: u16 = 2;

/// What a screen position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    ColumnHeader(i32),
    RowHeader(i32),
    Cell(Coordinate),
    FillHandle(Coordinate),
}

pub struct GridApp {
    pub shape: SharedModel,
    manager: Box<dyn StateManager>,
    pub state: SelectionState,
    keymap: Keymap,
    pub scroll_row: i32,
    pub scroll_col: i32,
    /// Text being typed while the selection machine is in edit mode.
    pub edit_buffer: Option<String>,
    pub should_quit: bool,
}

impl GridApp {
    pub fn new(shape: SharedModel, mode: SelectionMode, keymap: Keymap) -> Self {
        let manager = state_manager(mode, shape.clone());
        Self {
            shape,
            manager,
            state: SelectionState::empty(),
            keymap,
            scroll_row: 0,
            scroll_col: 0,
            edit_buffer: None,
            should_quit: false,
        }
    }

    /// Forward a classified input; commit the result if there is one.
    pub fn apply(&mut self, input: SelectionInput) -> bool {
        match self.manager.apply(&self.state, &input) {
            Some(next) => {
                log::debug!(
                    "transition {:?}: {:?} -> {:?} (primary {})",
                    input,
                    self.state.mode,
                    next.mode,
                    next.primary
                );
                let was_editing = self.state.mode == InteractionMode::Edit;
                self.state = next;
                if self.state.mode == InteractionMode::Edit {
                    if !was_editing {
                        self.start_editing();
                    }
                } else {
                    self.edit_buffer = None;
                }
                true
            }
            None => {
                log::trace!("input {:?} ignored in {:?}", input, self.state.mode);
                false
            }
        }
    }

    fn start_editing(&mut self) {
        let p = self.state.primary;
        let value = self.shape.0.borrow().value(p.row, p.col);
        self.edit_buffer = Some(value);
    }

    fn commit_edit(&mut self) {
        if let Some(buffer) = self.edit_buffer.take() {
            let p = self.state.primary;
            log::info!("commit {} = {:?}", p, buffer);
            self.shape.0.borrow_mut().set_value(p.row, p.col, buffer);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        if self.state.mode == InteractionMode::Edit {
            self.handle_editing_key(key);
            return;
        }

        if let Some(combo) = classify_key(key.code, shift, ctrl) {
            if let Some(command) = self.keymap.resolve(combo) {
                self.apply(command.input());
            } else {
                log::trace!("unbound chord {combo}");
            }
            return;
        }

        // Printable characters open the editor, seeded with the keystroke.
        if let KeyCode::Char(c) = key.code {
            if !ctrl && self.apply(SelectionInput::CharKey) {
                self.edit_buffer = Some(c.to_string());
            }
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // Discard the buffer; the machine returns to Select.
                self.edit_buffer = None;
                self.apply(SelectionInput::Cancel);
            }
            KeyCode::Enter => {
                self.commit_edit();
                self.apply(SelectionInput::Enter {
                    shift: key.modifiers.contains(KeyModifiers::SHIFT),
                });
            }
            KeyCode::Tab => {
                self.commit_edit();
                self.apply(SelectionInput::Tab { shift: false });
            }
            KeyCode::BackTab => {
                self.commit_edit();
                self.apply(SelectionInput::Tab { shift: true });
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.edit_buffer.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.edit_buffer.as_mut() {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, ev: MouseEvent) {
        let mods = Modifiers {
            shift: ev.modifiers.contains(KeyModifiers::SHIFT),
            ctrl: ev.modifiers.contains(KeyModifiers::CONTROL),
        };

        match ev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.state.mode == InteractionMode::Edit {
                    self.commit_edit();
                }
                match self.hit_test(ev.column, ev.row) {
                    Some(Hit::FillHandle(target)) => {
                        self.apply(SelectionInput::FillMouseDown { target });
                    }
                    Some(Hit::ColumnHeader(col)) => {
                        self.apply(SelectionInput::CellMouseDown {
                            target: Coordinate::header(col),
                            mods,
                        });
                    }
                    Some(Hit::RowHeader(row)) => {
                        let col = self.shape.min_selectable_col();
                        self.apply(SelectionInput::CellMouseDown {
                            target: Coordinate::cell(row, col).as_row_header(),
                            mods,
                        });
                    }
                    Some(Hit::Cell(target)) => {
                        self.apply(SelectionInput::CellMouseDown { target, mods });
                    }
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(target) = self.data_cell_at(ev.column, ev.row) {
                    if self.state.mode == InteractionMode::Filling {
                        self.apply(SelectionInput::FillMouseEnter { target });
                    } else {
                        self.apply(SelectionInput::CellMouseEnter { target });
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let target = self
                    .data_cell_at(ev.column, ev.row)
                    .unwrap_or(self.state.primary);
                if self.state.mode == InteractionMode::Filling {
                    self.apply(SelectionInput::FillMouseUp { target });
                } else {
                    self.apply(SelectionInput::CellMouseUp {
                        target,
                        open_editor: false,
                    });
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(target) = self.data_cell_at(ev.column, ev.row) {
                    self.apply(SelectionInput::RightClick { target });
                }
            }
            _ => {}
        }
    }

    /// Resolve a screen position to a header, gutter, cell, or the active
    /// region's fill handle (the bottom-right corner of its last cell).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<Hit> {
        let header_hidden = self.shape.column_header_hidden();
        let header_y = 1;
        let data_y = if header_hidden { 1 } else { HEADER_LINES };

        if !header_hidden && y == header_y {
            let col = self.col_at_x(x)?;
            return Some(Hit::ColumnHeader(col));
        }
        if y < data_y {
            return None;
        }

        let row = self.scroll_row + (y - data_y) as i32;
        if row > self.shape.max_row() {
            return None;
        }
        if x < GUTTER_WIDTH {
            return Some(Hit::RowHeader(row));
        }

        let col = self.col_at_x(x)?;
        let coord = Coordinate::cell(row, col);

        if let Some(region) = self.state.active_region() {
            let rows = region.row_range();
            let cols = region.col_range();
            if row == rows.end && col == cols.end {
                // Last two character cells of the corner act as the handle.
                let cell_x = (x - GUTTER_WIDTH) % CELL_WIDTH;
                if cell_x >= CELL_WIDTH - 3 {
                    return Some(Hit::FillHandle(coord));
                }
            }
        }

        Some(Hit::Cell(coord))
    }

    fn data_cell_at(&self, x: u16, y: u16) -> Option<Coordinate> {
        match self.hit_test(x, y) {
            Some(Hit::Cell(coord)) | Some(Hit::FillHandle(coord)) => Some(coord),
            Some(Hit::RowHeader(row)) => {
                Some(Coordinate::cell(row, self.shape.min_selectable_col()))
            }
            _ => None,
        }
    }

    fn col_at_x(&self, x: u16) -> Option<i32> {
        if x < GUTTER_WIDTH {
            return None;
        }
        let col = self.scroll_col + ((x - GUTTER_WIDTH) / CELL_WIDTH) as i32;
        if col > self.shape.max_col() {
            None
        } else {
            Some(col)
        }
    }

    /// Keep the primary (or the drag end) inside the viewport.
    pub fn ensure_visible(&mut self, visible_rows: i32, visible_cols: i32) {
        let focus = self
            .state
            .active_region()
            .map(|r| r.secondary)
            .unwrap_or(self.state.primary);
        let row = focus.row.max(0);
        let col = focus.col.max(0);

        if row < self.scroll_row {
            self.scroll_row = row;
        } else if visible_rows > 0 && row >= self.scroll_row + visible_rows {
            self.scroll_row = row - visible_rows + 1;
        }

        if col < self.scroll_col {
            self.scroll_col = col;
        } else if visible_cols > 0 && col >= self.scroll_col + visible_cols {
            self.scroll_col = col - visible_cols + 1;
        }
    }
}

/// Map a crossterm key event to a chord, when it is one the keymap can
/// hold. Shift+Tab arrives as `BackTab`.
fn classify_key(code: KeyCode, shift: bool, ctrl: bool) -> Option<KeyCombo> {
    let key = match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            let mut combo = KeyCombo::new(Key::Tab).with_shift();
            if ctrl {
                combo = combo.with_ctrl();
            }
            return Some(combo);
        }
        KeyCode::Esc => Key::Escape,
        KeyCode::F(2) => Key::F2,
        _ => return None,
    };

    let mut combo = KeyCombo::new(key);
    if shift {
        combo = combo.with_shift();
    }
    if ctrl {
        combo = combo.with_ctrl();
    }
    Some(combo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GridModel;

    fn app(mode: SelectionMode) -> GridApp {
        let shape = SharedModel::new(GridModel::new(20, 5, false, false, Vec::new()));
        GridApp::new(shape, mode, Keymap::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keyboard_flow_focus_move_edit() {
        let mut a = app(SelectionMode::MultiCell);
        assert!(a.apply(SelectionInput::Focus));
        assert_eq!(a.state.primary, Coordinate::header(0));

        a.handle_key(key(KeyCode::Down));
        assert_eq!(a.state.primary, Coordinate::cell(0, 0));

        a.handle_key(key(KeyCode::F(2)));
        assert_eq!(a.state.mode, InteractionMode::Edit);
        assert_eq!(a.edit_buffer.as_deref(), Some("r1c1"));

        a.handle_key(key(KeyCode::Char('x')));
        a.handle_key(key(KeyCode::Enter));
        assert_eq!(a.state.mode, InteractionMode::Select);
        assert_eq!(a.state.primary, Coordinate::cell(1, 0));
        assert_eq!(a.shape.0.borrow().value(0, 0), "r1c1x");
    }

    #[test]
    fn test_char_key_starts_fresh_edit() {
        let mut a = app(SelectionMode::MultiCell);
        a.apply(SelectionInput::Focus);
        a.handle_key(key(KeyCode::Down));

        a.handle_key(key(KeyCode::Char('7')));
        assert_eq!(a.state.mode, InteractionMode::Edit);
        assert_eq!(a.edit_buffer.as_deref(), Some("7"));

        a.handle_key(key(KeyCode::Esc));
        assert_eq!(a.state.mode, InteractionMode::Select);
        // Discarded, not committed.
        assert_eq!(a.shape.0.borrow().value(0, 0), "r1c1");
    }

    #[test]
    fn test_hit_test_maps_screen_to_grid() {
        let mut a = app(SelectionMode::MultiCell);
        a.scroll_row = 3;
        a.scroll_col = 1;

        assert_eq!(a.hit_test(GUTTER_WIDTH, 1), Some(Hit::ColumnHeader(1)));
        assert_eq!(a.hit_test(0, HEADER_LINES), Some(Hit::RowHeader(3)));
        assert_eq!(
            a.hit_test(GUTTER_WIDTH + CELL_WIDTH, HEADER_LINES + 2),
            Some(Hit::Cell(Coordinate::cell(5, 2)))
        );
        // Past the last column.
        assert_eq!(a.hit_test(GUTTER_WIDTH + CELL_WIDTH * 5, HEADER_LINES), None);
    }

    #[test]
    fn test_fill_handle_hit_on_region_corner() {
        let mut a = app(SelectionMode::MultiCell);
        a.apply(SelectionInput::CellMouseDown {
            target: Coordinate::cell(0, 0),
            mods: Modifiers::NONE,
        });
        a.apply(SelectionInput::CellMouseUp {
            target: Coordinate::cell(0, 0),
            open_editor: false,
        });

        // Corner cell, last columns of the cell box.
        let x = GUTTER_WIDTH + CELL_WIDTH - 2;
        assert_eq!(
            a.hit_test(x, HEADER_LINES),
            Some(Hit::FillHandle(Coordinate::cell(0, 0)))
        );
        // Same cell, left edge: a plain cell hit.
        assert_eq!(
            a.hit_test(GUTTER_WIDTH, HEADER_LINES),
            Some(Hit::Cell(Coordinate::cell(0, 0)))
        );
    }

    #[test]
    fn test_mouse_drag_extends_and_releases() {
        let mut a = app(SelectionMode::MultiCell);
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: GUTTER_WIDTH,
            row: HEADER_LINES,
            modifiers: KeyModifiers::NONE,
        };
        a.handle_mouse(down);
        assert_eq!(a.state.mode, InteractionMode::Selecting);

        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: GUTTER_WIDTH + CELL_WIDTH,
            row: HEADER_LINES + 2,
            modifiers: KeyModifiers::NONE,
        };
        a.handle_mouse(drag);
        let region = a.state.active_region().copied().unwrap();
        assert_eq!(region.row_range().end, 2);
        assert_eq!(region.col_range().end, 1);

        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: GUTTER_WIDTH + CELL_WIDTH,
            row: HEADER_LINES + 2,
            modifiers: KeyModifiers::NONE,
        };
        a.handle_mouse(up);
        assert_eq!(a.state.mode, InteractionMode::Select);
    }

    #[test]
    fn test_ensure_visible_scrolls_to_focus() {
        let mut a = app(SelectionMode::MultiCell);
        a.apply(SelectionInput::CellMouseDown {
            target: Coordinate::cell(15, 4),
            mods: Modifiers::NONE,
        });
        a.ensure_visible(10, 3);
        assert_eq!(a.scroll_row, 6);
        assert_eq!(a.scroll_col, 2);

        a.apply(SelectionInput::CellMouseDown {
            target: Coordinate::cell(0, 0),
            mods: Modifiers::NONE,
        });
        a.ensure_visible(10, 3);
        assert_eq!(a.scroll_row, 0);
        assert_eq!(a.scroll_col, 0);
    }
}
