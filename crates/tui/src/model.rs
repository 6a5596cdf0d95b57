//! Demo grid model.
//!
//! Holds the cell values and the grid shape the state machine queries:
//! a deterministic row-span layout, optionally disabled columns, and an
//! editable-cell policy. The model is shared with the state manager through
//! a cheap `Rc<RefCell<..>>` handle.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use spangrid_core::coordinate::Coordinate;
use spangrid_core::shape::GridShape;

#[derive(Debug)]
pub struct GridModel {
    pub rows: i32,
    pub cols: i32,
    /// Span owners: `(row, col) -> span`.
    spans: HashMap<(i32, i32), u32>,
    /// Covered cell -> owning cell, derived from `spans`.
    owners: HashMap<(i32, i32), i32>,
    disabled_cols: Vec<i32>,
    header_hidden: bool,
    values: HashMap<(i32, i32), String>,
}

impl GridModel {
    pub fn new(
        rows: i32,
        cols: i32,
        with_spans: bool,
        header_hidden: bool,
        disabled_cols: Vec<i32>,
    ) -> Self {
        let mut model = Self {
            rows,
            cols,
            spans: HashMap::new(),
            owners: HashMap::new(),
            disabled_cols,
            header_hidden,
            values: HashMap::new(),
        };

        if with_spans {
            // Staggered blocks so span edges land mid-selection often.
            let mut row = 2;
            while row + 2 < rows {
                model.add_span(row, 0, 3);
                row += 7;
            }
            let mut row = 4;
            while row + 1 < rows && cols > 2 {
                model.add_span(row, 2, 2);
                row += 9;
            }
        }

        for r in 0..rows {
            for c in 0..cols {
                if model.owner_row(r, c) == r {
                    model.values.insert((r, c), format!("r{}c{}", r + 1, c + 1));
                }
            }
        }

        model
    }

    fn add_span(&mut self, row: i32, col: i32, span: u32) {
        self.spans.insert((row, col), span);
        for covered in (row + 1)..(row + span as i32) {
            self.owners.insert((covered, col), row);
        }
    }

    /// Row of the cell that owns `(row, col)`; `row` itself outside spans.
    pub fn owner_row(&self, row: i32, col: i32) -> i32 {
        self.owners.get(&(row, col)).copied().unwrap_or(row)
    }

    pub fn span_at(&self, row: i32, col: i32) -> u32 {
        self.spans.get(&(row, col)).copied().unwrap_or(1)
    }

    pub fn value(&self, row: i32, col: i32) -> String {
        let owner = self.owner_row(row, col);
        self.values.get(&(owner, col)).cloned().unwrap_or_default()
    }

    pub fn set_value(&mut self, row: i32, col: i32, value: String) {
        let owner = self.owner_row(row, col);
        self.values.insert((owner, col), value);
    }

    pub fn is_disabled(&self, col: i32) -> bool {
        self.disabled_cols.contains(&col)
    }
}

/// Shared handle implementing the shape queries over the model.
#[derive(Clone)]
pub struct SharedModel(pub Rc<RefCell<GridModel>>);

impl SharedModel {
    pub fn new(model: GridModel) -> Self {
        Self(Rc::new(RefCell::new(model)))
    }
}

impl GridShape for SharedModel {
    fn mapped_cell(&self, coord: Coordinate) -> Coordinate {
        if coord.in_header_row() {
            return coord;
        }
        let model = self.0.borrow();
        Coordinate::cell(model.owner_row(coord.row, coord.col), coord.col)
    }

    fn row_span(&self, coord: Coordinate) -> u32 {
        if coord.in_header_row() {
            return 1;
        }
        self.0.borrow().span_at(coord.row, coord.col)
    }

    fn max_row(&self) -> i32 {
        self.0.borrow().rows - 1
    }

    fn max_col(&self) -> i32 {
        self.0.borrow().cols - 1
    }

    fn min_selectable_col(&self) -> i32 {
        let model = self.0.borrow();
        (0..model.cols)
            .find(|c| !model.is_disabled(*c))
            .unwrap_or(0)
    }

    fn max_selectable_col(&self) -> i32 {
        let model = self.0.borrow();
        (0..model.cols)
            .rev()
            .find(|c| !model.is_disabled(*c))
            .unwrap_or(model.cols - 1)
    }

    fn is_cell_editable(&self, coord: Coordinate) -> bool {
        !coord.in_header_row() && !self.0.borrow().is_disabled(coord.col)
    }

    fn is_column_selectable(&self, col: i32) -> bool {
        let model = self.0.borrow();
        col >= 0 && col < model.cols && !model.is_disabled(col)
    }

    fn column_header_hidden(&self) -> bool {
        self.0.borrow().header_hidden
    }
}
