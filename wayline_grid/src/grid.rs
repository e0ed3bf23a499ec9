// Copyright 2026 the Wayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The segment grid: cell geometry, storage, insertion, and range queries.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, Point, Rect};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::geom;
use crate::walk::CellWalk;

/// Parameters controlling range queries.
#[derive(Clone, Copy, Debug)]
pub struct QueryParams {
    /// Re-test candidates against their retained segment geometry.
    ///
    /// Cell membership only proves that a segment passed through a cell the
    /// query box covers, not that it enters the box itself. With `exact` set
    /// (the default), each candidate is kept only if one of its segments
    /// actually intersects the query box. Clearing it returns the cheaper
    /// cell-overlap approximation, which may contain false positives.
    pub exact: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self { exact: true }
    }
}

/// Uniform-grid spatial index over 2D line segments.
///
/// The grid covers a fixed bounding box divided into `num_cols * num_rows`
/// rectangular cells. Inserting a segment registers its caller-supplied item
/// id in every cell the segment passes through; a range query gathers the
/// ids registered in the cells covering the query box and (by default)
/// filters them against the retained segment geometry.
///
/// Cell geometry is immutable after construction. Build first, query after:
/// the caller serializes all [`add_segment`][Self::add_segment] calls, and
/// queries (`&self`) are safe to run concurrently once building has ended.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Line, Rect};
/// use wayline_grid::SegmentGrid;
///
/// let mut grid: SegmentGrid<u32> =
///     SegmentGrid::with_dimensions(Rect::new(0.0, 0.0, 100.0, 100.0), 100, 100)?;
/// grid.add_segment(7, Line::new((0.0, 0.0), (0.5, 0.5)))?;
///
/// assert_eq!(grid.query(Rect::new(0.0, 0.0, 0.5, 0.5)), [7]);
/// assert!(grid.query(Rect::new(0.6, 0.6, 1.0, 1.0)).is_empty());
/// # Ok::<(), wayline_grid::GridError>(())
/// ```
pub struct SegmentGrid<I> {
    bbox: Rect,
    cell_width: f64,
    cell_height: f64,
    num_cols: usize,
    num_rows: usize,
    /// Row-major cell buckets, addressed by `col + row * num_cols`.
    cells: Vec<SmallVec<[I; 4]>>,
    /// Original geometry per item, for the exact query filter.
    segments: HashMap<I, SmallVec<[Line; 2]>>,
}

impl<I> Debug for SegmentGrid<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        f.debug_struct("SegmentGrid")
            .field("bbox", &self.bbox)
            .field("cell_width", &self.cell_width)
            .field("cell_height", &self.cell_height)
            .field("num_cols", &self.num_cols)
            .field("num_rows", &self.num_rows)
            .field("items", &self.segments.len())
            .field("occupied_cells", &occupied)
            .finish_non_exhaustive()
    }
}

impl<I> SegmentGrid<I> {
    /// Create a grid over `bbox` with the given cell dimensions.
    ///
    /// Column and row counts are chosen by ceiling division, so the grid
    /// fully covers `bbox` even when the dimensions don't divide evenly; the
    /// last column/row then extends past the box.
    ///
    /// Fails with [`GridError::Configuration`] if either dimension is not
    /// strictly positive and finite, or if `bbox` is degenerate or inverted.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Ceiling division of validated positive finite extents; the cast is the intended floor."
    )]
    pub fn with_cell_size(
        bbox: Rect,
        cell_width: f64,
        cell_height: f64,
    ) -> Result<Self, GridError> {
        if !(cell_width > 0.0 && cell_height > 0.0)
            || !cell_width.is_finite()
            || !cell_height.is_finite()
        {
            return Err(GridError::Configuration(
                "cell dimensions must be strictly positive",
            ));
        }
        Self::check_bbox(bbox)?;
        let num_cols = (bbox.width() / cell_width).ceil() as usize;
        let num_rows = (bbox.height() / cell_height).ceil() as usize;
        Ok(Self::from_parts(
            bbox,
            cell_width,
            cell_height,
            num_cols,
            num_rows,
        ))
    }

    /// Create a grid over `bbox` divided into `num_cols` by `num_rows` cells.
    ///
    /// Cell dimensions are derived by dividing the box extents; the counts
    /// are used as given (no re-derivation, so floating-point rounding can
    /// never produce an extra column or row).
    ///
    /// Fails with [`GridError::Configuration`] if either count is zero or if
    /// `bbox` is degenerate or inverted.
    pub fn with_dimensions(
        bbox: Rect,
        num_cols: usize,
        num_rows: usize,
    ) -> Result<Self, GridError> {
        if num_cols == 0 || num_rows == 0 {
            return Err(GridError::Configuration("cell counts must be nonzero"));
        }
        Self::check_bbox(bbox)?;
        let cell_width = bbox.width() / num_cols as f64;
        let cell_height = bbox.height() / num_rows as f64;
        Ok(Self::from_parts(
            bbox,
            cell_width,
            cell_height,
            num_cols,
            num_rows,
        ))
    }

    fn check_bbox(bbox: Rect) -> Result<(), GridError> {
        if !(bbox.width() > 0.0 && bbox.height() > 0.0)
            || !bbox.width().is_finite()
            || !bbox.height().is_finite()
        {
            return Err(GridError::Configuration(
                "bounding box must have positive finite extent",
            ));
        }
        Ok(())
    }

    fn from_parts(
        bbox: Rect,
        cell_width: f64,
        cell_height: f64,
        num_cols: usize,
        num_rows: usize,
    ) -> Self {
        debug_assert!(num_cols > 0 && num_rows > 0, "validated by constructors");
        Self {
            bbox,
            cell_width,
            cell_height,
            num_cols,
            num_rows,
            cells: (0..num_cols * num_rows).map(|_| SmallVec::new()).collect(),
            segments: HashMap::new(),
        }
    }

    /// The bounding box the grid covers.
    #[inline]
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Cell width.
    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Cell height.
    #[inline]
    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Number of columns.
    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of rows.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of distinct item ids currently indexed.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.segments.len()
    }

    /// Whether the grid holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Map a point to the `(col, row)` of the cell containing it.
    ///
    /// Defined precisely for points inside the grid's bounding box; points on
    /// the max edge clamp to the last column/row, so the result is always a
    /// valid index. Points outside the box clamp to the nearest cell.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Floor of a clamped non-negative value; the cast is the intended floor."
    )]
    pub fn cell_coords(&self, p: Point) -> (usize, usize) {
        let col = ((p.x - self.bbox.x0) / self.cell_width).floor();
        let row = ((p.y - self.bbox.y0) / self.cell_height).floor();
        let col = (col.max(0.0) as usize).min(self.num_cols - 1);
        let row = (row.max(0.0) as usize).min(self.num_rows - 1);
        (col, row)
    }

    /// The bounding box of the cell at `(col, row)`.
    ///
    /// Adjacent cells are seamless: each cell's max edge is its neighbor's
    /// min edge.
    pub fn cell_bbox(&self, col: usize, row: usize) -> Rect {
        debug_assert!(
            col < self.num_cols && row < self.num_rows,
            "cell index out of range"
        );
        let x0 = self.bbox.x0 + col as f64 * self.cell_width;
        let y0 = self.bbox.y0 + row as f64 * self.cell_height;
        Rect::new(x0, y0, x0 + self.cell_width, y0 + self.cell_height)
    }

    /// Walk the cells a segment passes through, in order from `p0` to `p1`.
    ///
    /// Cells are clamped into the grid, so the walk is total; for segments
    /// fully inside the bounding box it visits exactly the crossed cells.
    pub fn cell_walk(&self, segment: Line) -> CellWalk {
        CellWalk::new(
            Point::new(self.bbox.x0, self.bbox.y0),
            self.cell_width,
            self.cell_height,
            self.cell_coords(segment.p0),
            self.cell_coords(segment.p1),
            segment,
        )
    }

    /// Intersection points of a segment with the four edges of a cell.
    ///
    /// Edges are tested in order: bottom, right, top, left. A diagnostic
    /// helper; the exact query filter uses the same underlying test.
    pub fn cell_segment_intersections(
        &self,
        col: usize,
        row: usize,
        segment: Line,
    ) -> SmallVec<[Point; 4]> {
        let cell = self.cell_bbox(col, row);
        let mut out = SmallVec::new();
        for edge in geom::rect_edges(&cell) {
            if let Some(p) = geom::segment_intersection(segment, edge) {
                out.push(p);
            }
        }
        out
    }

    /// The item ids registered in the cell at `(col, row)`, in insertion order.
    pub fn items_in_cell(&self, col: usize, row: usize) -> &[I] {
        debug_assert!(
            col < self.num_cols && row < self.num_rows,
            "cell index out of range"
        );
        &self.cells[col + row * self.num_cols]
    }

    /// Remove all indexed items, keeping the cell geometry.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.segments.clear();
    }

    #[inline]
    fn cell_index(&self, col: usize, row: usize) -> usize {
        debug_assert!(
            col < self.num_cols && row < self.num_rows,
            "cell index out of range"
        );
        col + row * self.num_cols
    }
}

impl<I: Copy + Eq + Hash + Debug> SegmentGrid<I> {
    /// Index a line segment under the given item id.
    ///
    /// Registers `id` in every cell the segment passes through (at most once
    /// per cell per call) and retains the segment for exact filtering. One id
    /// may be added several times with different segments, e.g. once per leg
    /// of a polyline edge; queries still report it once.
    ///
    /// Both endpoints must lie within the grid's bounding box (inclusive),
    /// else the call fails with [`GridError::OutOfBounds`] and the grid is
    /// unchanged. The caller is expected to clip segments to the coverage
    /// region beforehand.
    pub fn add_segment(&mut self, id: I, segment: Line) -> Result<(), GridError> {
        for p in [segment.p0, segment.p1] {
            if !geom::contains_inclusive(&self.bbox, p) {
                return Err(GridError::OutOfBounds(p));
            }
        }
        let touched: SmallVec<[(usize, usize); 8]> = self.cell_walk(segment).collect();
        for (col, row) in touched {
            let idx = self.cell_index(col, row);
            self.cells[idx].push(id);
        }
        self.segments.entry(id).or_default().push(segment);
        Ok(())
    }

    /// The segments retained for an item id, in insertion order.
    pub fn segments_for(&self, id: I) -> Option<&[Line]> {
        self.segments.get(&id).map(|s| s.as_slice())
    }

    /// Query the ids of items intersecting the given box, with default
    /// parameters (exact filtering).
    ///
    /// Results are deduplicated, in first-seen cell order. A box outside the
    /// grid yields an empty result, never an error.
    pub fn query(&self, range: Rect) -> Vec<I> {
        self.query_with(range, &QueryParams::default())
    }

    /// Query with explicit [`QueryParams`].
    pub fn query_with(&self, range: Rect, params: &QueryParams) -> Vec<I> {
        let mut out = Vec::new();
        self.visit_query(range, params, |id| out.push(id));
        out
    }

    /// Query with results in ascending item-id order.
    pub fn query_sorted(&self, range: Rect, params: &QueryParams) -> Vec<I>
    where
        I: Ord,
    {
        let mut out = self.query_with(range, params);
        out.sort_unstable();
        out
    }

    /// Visit the ids of items intersecting the given box, without allocating
    /// result storage.
    ///
    /// Calls `f(id)` once per matching item, in first-seen cell order.
    pub fn visit_query<F: FnMut(I)>(&self, range: Rect, params: &QueryParams, mut f: F) {
        let Some(clipped) = geom::clip_rect(&self.bbox, &range) else {
            return;
        };
        let (col0, row0) = self.cell_coords(Point::new(clipped.x0, clipped.y0));
        let (col1, row1) = self.cell_coords(Point::new(clipped.x1, clipped.y1));

        let mut seen: HashSet<I> = HashSet::new();
        for row in row0..=row1 {
            for col in col0..=col1 {
                for &id in &self.cells[col + row * self.num_cols] {
                    if !seen.insert(id) {
                        continue;
                    }
                    if params.exact && !self.item_intersects(id, &range) {
                        continue;
                    }
                    f(id);
                }
            }
        }
    }

    fn item_intersects(&self, id: I, range: &Rect) -> bool {
        self.segments
            .get(&id)
            .is_some_and(|segs| segs.iter().any(|s| geom::segment_intersects_rect(*s, range)))
    }
}
