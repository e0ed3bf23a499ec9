// Copyright 2026 the Wayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parametric grid traversal for line segments.
//!
//! [`CellWalk`] yields every cell a segment passes through, in order from
//! `p0` to `p1`. Rather than stepping the current position by a fixed
//! increment, each step computes the parameter at which the segment crosses
//! into the adjacent column or row and advances the corresponding cell index
//! directly. Column and row indices move monotonically toward the end cell,
//! so every yielded cell is distinct, the walk visits at most
//! `num_cols + num_rows` cells, and it terminates for any input segment.

use kurbo::{Line, Point};

/// Iterator over the `(col, row)` cells a segment passes through.
///
/// Created by [`SegmentGrid::cell_walk`][crate::SegmentGrid::cell_walk].
/// Cells are yielded in traversal order starting at the cell containing `p0`
/// and ending at the cell containing `p1`; a degenerate segment yields
/// exactly one cell.
#[derive(Clone, Debug)]
pub struct CellWalk {
    segment: Line,
    origin: Point,
    cell_width: f64,
    cell_height: f64,
    cur: (usize, usize),
    end: (usize, usize),
    col_dir: i8,
    row_dir: i8,
    done: bool,
}

impl CellWalk {
    pub(crate) fn new(
        origin: Point,
        cell_width: f64,
        cell_height: f64,
        start: (usize, usize),
        end: (usize, usize),
        segment: Line,
    ) -> Self {
        let d = segment.p1 - segment.p0;
        let col_dir = if d.x > 0.0 {
            1
        } else if d.x < 0.0 {
            -1
        } else {
            0
        };
        let row_dir = if d.y > 0.0 {
            1
        } else if d.y < 0.0 {
            -1
        } else {
            0
        };
        Self {
            segment,
            origin,
            cell_width,
            cell_height,
            cur: start,
            end,
            col_dir,
            row_dir,
            done: false,
        }
    }

    /// Parameters at which the segment crosses out of the current column and
    /// row, computed from absolute boundary coordinates to avoid drift.
    fn crossing_params(&self) -> (f64, f64) {
        let d = self.segment.p1 - self.segment.p0;
        let tx = match self.col_dir {
            1 => {
                let bound = self.origin.x + (self.cur.0 + 1) as f64 * self.cell_width;
                (bound - self.segment.p0.x) / d.x
            }
            -1 => {
                let bound = self.origin.x + self.cur.0 as f64 * self.cell_width;
                (bound - self.segment.p0.x) / d.x
            }
            _ => f64::INFINITY,
        };
        let ty = match self.row_dir {
            1 => {
                let bound = self.origin.y + (self.cur.1 + 1) as f64 * self.cell_height;
                (bound - self.segment.p0.y) / d.y
            }
            -1 => {
                let bound = self.origin.y + self.cur.1 as f64 * self.cell_height;
                (bound - self.segment.p0.y) / d.y
            }
            _ => f64::INFINITY,
        };
        (tx, ty)
    }

    fn step_col(&mut self) {
        match self.col_dir {
            1 => self.cur.0 = (self.cur.0 + 1).min(self.end.0),
            -1 => self.cur.0 = self.cur.0.saturating_sub(1).max(self.end.0),
            _ => {}
        }
    }

    fn step_row(&mut self) {
        match self.row_dir {
            1 => self.cur.1 = (self.cur.1 + 1).min(self.end.1),
            -1 => self.cur.1 = self.cur.1.saturating_sub(1).max(self.end.1),
            _ => {}
        }
    }
}

impl Iterator for CellWalk {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.done {
            return None;
        }
        let visited = self.cur;
        if self.cur == self.end {
            self.done = true;
            return Some(visited);
        }

        let (tx, ty) = self.crossing_params();
        if tx.min(ty) >= 1.0 {
            // No boundary crossing remains before p1: the rest of the segment
            // lies in the end cell.
            self.cur = self.end;
            return Some(visited);
        }

        // Advance whichever axis crosses first; both on an exact corner hit.
        // Steps are clamped to the end cell's column/row, which keeps the
        // indices monotone even when a crossing parameter lands a rounding
        // error short of 1.
        let prev = self.cur;
        if tx <= ty {
            self.step_col();
        }
        if ty <= tx {
            self.step_row();
        }
        if self.cur == prev {
            // Fully clamped: the remaining travel hugs the end cell boundary.
            self.cur = self.end;
        }
        Some(visited)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Line, Rect};

    use crate::SegmentGrid;

    fn unit_grid() -> SegmentGrid<u32> {
        SegmentGrid::with_dimensions(Rect::new(0.0, 0.0, 100.0, 100.0), 100, 100)
            .expect("valid grid configuration")
    }

    #[test]
    fn horizontal_walk() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((0.5, 0.5), (4.5, 0.5)))
            .collect();
        assert_eq!(cells, [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn vertical_walk() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((2.5, 0.5), (2.5, 3.5)))
            .collect();
        assert_eq!(cells, [(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn diagonal_through_corners_steps_both_axes() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((0.5, 0.5), (3.5, 3.5)))
            .collect();
        assert_eq!(cells, [(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn shallow_slope_visits_every_crossed_cell() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((0.2, 0.5), (3.7, 1.5)))
            .collect();
        // Crosses x=1, y=1, x=2, x=3 in that order.
        assert_eq!(cells, [(0, 0), (1, 0), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn degenerate_segment_yields_one_cell() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((12.5, 13.7), (12.5, 13.7)))
            .collect();
        assert_eq!(cells, [(12, 13)]);
    }

    #[test]
    fn reversed_walk_is_monotone_descending() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((4.5, 0.5), (0.5, 0.5)))
            .collect();
        assert_eq!(cells, [(4, 0), (3, 0), (2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn start_on_interior_boundary() {
        let grid = unit_grid();
        // p0 sits exactly on the column boundary at x=3; floor places it in
        // column 3, and walking in -x immediately crosses into column 2.
        let cells: Vec<_> = grid
            .cell_walk(Line::new((3.0, 0.5), (1.5, 0.5)))
            .collect();
        assert_eq!(cells, [(3, 0), (2, 0), (1, 0)]);
    }

    #[test]
    fn endpoint_on_grid_max_edge() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((99.5, 99.5), (100.0, 100.0)))
            .collect();
        assert_eq!(cells, [(99, 99)]);
    }

    #[test]
    fn long_diagonal_terminates() {
        let grid = unit_grid();
        let cells: Vec<_> = grid
            .cell_walk(Line::new((0.5, 0.5), (50.5, 50.5)))
            .collect();
        assert_eq!(cells.len(), 51);
        assert_eq!(cells.first(), Some(&(0, 0)));
        assert_eq!(cells.last(), Some(&(50, 50)));
        // Every visited cell is distinct.
        let mut dedup = cells.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), cells.len());
    }
}
