// Copyright 2026 the Wayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=wayline_grid --heading-base-level=0

//! Wayline Grid: a uniform-grid spatial index over 2D line segments.
//!
//! Wayline Grid accelerates "which indexed segments lie near this region"
//! queries against a static or incrementally built dataset, such as the
//! road-network edges a map-matcher scans for candidates.
//!
//! - Divide a bounding box into uniform cells at construction time.
//! - Insert line segments under caller-supplied item ids; each segment is
//!   registered in every cell it passes through.
//! - Query by bounding box; candidates from the covered cells are filtered
//!   against the retained segment geometry (or returned unfiltered as a
//!   cheaper approximation).
//!
//! Geometry uses [`kurbo`] primitives: [`Point`][kurbo::Point],
//! [`Line`][kurbo::Line] for segments, and [`Rect`][kurbo::Rect] for
//! bounding boxes. Coordinates are assumed planar; project before indexing.
//!
//! The grid is build-then-query: serialize insertions, then query freely
//! (queries take `&self` and are safe to run concurrently). There is no
//! persistence, re-gridding, or implicit clipping.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Line, Rect};
//! use wayline_grid::{QueryParams, SegmentGrid};
//!
//! // A 100x100 world split into 1x1 cells.
//! let bbox = Rect::new(0.0, 0.0, 100.0, 100.0);
//! let mut grid: SegmentGrid<u32> = SegmentGrid::with_dimensions(bbox, 100, 100)?;
//!
//! // Index two road edges; the second is a polyline with two legs.
//! grid.add_segment(17, Line::new((2.5, 3.5), (10.0, 3.5)))?;
//! grid.add_segment(42, Line::new((4.0, 1.0), (6.0, 2.5)))?;
//! grid.add_segment(42, Line::new((6.0, 2.5), (9.0, 2.5)))?;
//!
//! // Exact query: only edges whose geometry enters the box.
//! let mut hits = grid.query(Rect::new(3.0, 2.0, 7.0, 4.0));
//! hits.sort_unstable();
//! assert_eq!(hits, [17, 42]);
//!
//! // Approximate query: cell overlap only, may include false positives.
//! let approx = grid.query_with(
//!     Rect::new(3.0, 2.0, 7.0, 4.0),
//!     &QueryParams { exact: false },
//! );
//! assert!(approx.len() >= 2);
//! # Ok::<(), wayline_grid::GridError>(())
//! ```
//!
//! # Features
//!
//! - `std` *(default)*: use the standard library's float functions.
//! - `libm`: float functions via `libm` for `no_std` targets (forwarded to
//!   `kurbo`). Enable exactly one of `std` and `libm`.
//!
//! ## Float semantics
//!
//! This crate assumes no NaNs in indexed geometry or query boxes.
//! Construction validates its inputs; debug builds may assert elsewhere.

#![no_std]

extern crate alloc;

mod error;
pub mod geom;
mod grid;
mod walk;

pub use error::GridError;
pub use grid::{QueryParams, SegmentGrid};
pub use walk::CellWalk;
