//! Rectangular selection regions and their geometry.
//!
//! Contains:
//! - `Region`: a rectangle defined by an anchor (`primary`) and a free
//!   corner (`secondary`), with normalized inclusive ranges
//! - Overlap, merge, and containment tests
//! - Edge-position flags for rendering selection borders
//! - Fill-strip derivation for the fill handle
//! - Span rectangularization: repairing a rectangle so no row-spanning
//!   cell is left partially inside it

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::shape::GridShape;

/// Inclusive index range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: i32,
    pub end: i32,
}

impl IndexRange {
    pub fn contains(&self, index: i32) -> bool {
        index >= self.start && index <= self.end
    }

    pub fn intersects(&self, other: &IndexRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A rectangular set of coordinates.
///
/// `primary` is the anchor (the drag or keyboard origin); `secondary` is the
/// free end. The derived ranges are normalized, so the rectangle is the same
/// regardless of drag direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Region {
    pub primary: Coordinate,
    pub secondary: Coordinate,
}

/// Where a cell sits relative to a region's edges. `bottom` also triggers
/// for a spanning cell whose last row lands on the range end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellPosition {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub in_region: bool,
}

impl Region {
    pub fn new(primary: Coordinate, secondary: Coordinate) -> Self {
        Self { primary, secondary }
    }

    /// A single-cell region anchored at `coord`.
    pub fn cell(coord: Coordinate) -> Self {
        Self {
            primary: coord,
            secondary: coord,
        }
    }

    /// The same anchor with a new free corner.
    pub fn with_secondary(&self, secondary: Coordinate) -> Self {
        Self {
            primary: self.primary,
            secondary,
        }
    }

    pub fn row_range(&self) -> IndexRange {
        IndexRange {
            start: self.primary.row.min(self.secondary.row),
            end: self.primary.row.max(self.secondary.row),
        }
    }

    pub fn col_range(&self) -> IndexRange {
        IndexRange {
            start: self.primary.col.min(self.secondary.col),
            end: self.primary.col.max(self.secondary.col),
        }
    }

    pub fn is_single_cell(&self) -> bool {
        let rows = self.row_range();
        let cols = self.col_range();
        rows.start == rows.end && cols.start == cols.end
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.row_range().contains(coord.row) && self.col_range().contains(coord.col)
    }

    /// Iterate over every coordinate in the region, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let rows = self.row_range();
        let cols = self.col_range();
        (rows.start..=rows.end)
            .flat_map(move |r| (cols.start..=cols.end).map(move |c| Coordinate::cell(r, c)))
    }

    /// Axis-aligned rectangle intersection.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.row_range().intersects(&other.row_range())
            && self.col_range().intersects(&other.col_range())
    }

    /// Bounding union. The anchor stays on its original side of the result.
    pub fn merge(&self, other: &Region) -> Region {
        let rows = self.row_range();
        let cols = self.col_range();
        let other_rows = other.row_range();
        let other_cols = other.col_range();

        let top = rows.start.min(other_rows.start);
        let bottom = rows.end.max(other_rows.end);
        let left = cols.start.min(other_cols.start);
        let right = cols.end.max(other_cols.end);

        self.reshaped(top, bottom, left, right)
    }

    /// Edge flags for `coord`, used to draw selection borders. A cell inside
    /// a row span counts as the bottom edge when its span ends on the
    /// region's last row.
    pub fn cell_position<S: GridShape + ?Sized>(&self, coord: Coordinate, shape: &S) -> CellPosition {
        let in_region = self.contains(coord);
        if !in_region {
            return CellPosition::default();
        }

        let rows = self.row_range();
        let cols = self.col_range();
        let span_end = if coord.in_header_row() {
            coord.row
        } else {
            let owner = shape.mapped_cell(coord);
            owner.row + checked_span(shape, owner) - 1
        };

        CellPosition {
            top: coord.row == rows.start,
            bottom: coord.row == rows.end || span_end == rows.end,
            left: coord.col == cols.start,
            right: coord.col == cols.end,
            in_region,
        }
    }

    /// The strip the fill operation projects into for a hovered coordinate:
    /// rows below the region when hovering under it, rows above when
    /// hovering over it, `None` while the hover stays inside the row range.
    /// Columns always match the region's own.
    pub fn fill_region(&self, hover: Coordinate) -> Option<Region> {
        let rows = self.row_range();
        let cols = self.col_range();

        if hover.row > rows.end {
            Some(Region::new(
                Coordinate::cell(rows.end + 1, cols.start),
                Coordinate::cell(hover.row, cols.end),
            ))
        } else if hover.row < rows.start && hover.row >= 0 {
            Some(Region::new(
                Coordinate::cell(rows.start - 1, cols.start),
                Coordinate::cell(hover.row, cols.end),
            ))
        } else {
            None
        }
    }

    /// Repair the rectangle so no row-spanning cell is left partially
    /// inside it.
    ///
    /// Scans every column along the bottom edge, then the top edge, moving
    /// the edge whenever a span crosses it: outward when `add_partial` is
    /// true (growing a selection), inward when false (shrinking). Each edge
    /// is re-scanned until no column triggers an adjustment. If a retracting
    /// edge crosses the anchor row, the edge is clamped back to the anchor
    /// and the whole procedure re-runs in expanding mode; the re-run cannot
    /// retract, so recursion depth never exceeds the row count.
    ///
    /// Panics if the shape reports a zero row span (data-contract breach).
    pub fn rectangularized<S: GridShape + ?Sized>(&self, shape: &S, add_partial: bool) -> Region {
        self.rectangularize_rows(shape, add_partial, 0)
    }

    fn rectangularize_rows<S: GridShape + ?Sized>(
        &self,
        shape: &S,
        add_partial: bool,
        depth: i32,
    ) -> Region {
        debug_assert!(
            depth <= shape.max_row() + 2,
            "rectangularization failed to converge"
        );

        let rows = self.row_range();
        let cols = self.col_range();

        // Header-row regions have no spans to repair.
        if rows.start < 0 {
            return *self;
        }

        let anchor_row = self.primary.row;
        let mut top = rows.start;
        let mut bottom = rows.end;

        // Bottom edge fixed point.
        loop {
            let mut moved = false;
            for col in cols.start..=cols.end {
                let owner = shape.mapped_cell(Coordinate::cell(bottom, col));
                let last = owner.row + checked_span(shape, owner) - 1;
                if last > bottom {
                    bottom = if add_partial { last } else { owner.row - 1 };
                    moved = true;
                    break;
                }
            }
            if !moved {
                break;
            }
            if !add_partial && bottom < anchor_row {
                // Retraction crossed the anchor; the anchor must stay
                // selected, so re-run expanding from the clamped rectangle.
                return self
                    .reshaped(top.min(anchor_row), anchor_row, cols.start, cols.end)
                    .rectangularize_rows(shape, true, depth + 1);
            }
        }

        // Top edge fixed point.
        loop {
            let mut moved = false;
            for col in cols.start..=cols.end {
                let owner = shape.mapped_cell(Coordinate::cell(top, col));
                if owner.row < top {
                    top = if add_partial {
                        owner.row
                    } else {
                        owner.row + checked_span(shape, owner)
                    };
                    moved = true;
                    break;
                }
            }
            if !moved {
                break;
            }
            if !add_partial && top > anchor_row {
                return self
                    .reshaped(anchor_row, bottom.max(anchor_row), cols.start, cols.end)
                    .rectangularize_rows(shape, true, depth + 1);
            }
        }

        self.reshaped(top, bottom, cols.start, cols.end)
    }

    /// Rebuild the region with the given bounds, keeping each corner on the
    /// side of the rectangle it came from.
    fn reshaped(&self, top: i32, bottom: i32, left: i32, right: i32) -> Region {
        let (p_row, s_row) = if self.primary.row <= self.secondary.row {
            (top, bottom)
        } else {
            (bottom, top)
        };
        let (p_col, s_col) = if self.primary.col <= self.secondary.col {
            (left, right)
        } else {
            (right, left)
        };

        let mut primary = self.primary;
        primary.row = p_row;
        primary.col = p_col;
        let mut secondary = self.secondary;
        secondary.row = s_row;
        secondary.col = s_col;

        Region { primary, secondary }
    }
}

/// Regions compare by range: two rectangles covering the same cells are
/// equal no matter which corners define them.
impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.row_range() == other.row_range() && self.col_range() == other.col_range()
    }
}

pub(crate) fn checked_span<S: GridShape + ?Sized>(shape: &S, owner: Coordinate) -> i32 {
    let span = shape.row_span(owner);
    if span == 0 {
        panic!("row span for {} must be at least 1", owner);
    }
    span as i32
}
