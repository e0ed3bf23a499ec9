// Copyright 2026 the Wayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate edge lookup over a small road grid.
//!
//! Indexes a handful of polyline road edges into a segment grid, then runs a
//! viewport query both ways: exact (segment geometry must enter the box) and
//! approximate (cell overlap only).
//!
//! Run:
//! - `cargo run -p wayline_demos --example edge_lookup`

use kurbo::{Line, Rect};
use wayline_grid::{QueryParams, SegmentGrid};

fn main() {
    // A 1km x 1km tile split into 10m cells.
    let bbox = Rect::new(0.0, 0.0, 1000.0, 1000.0);
    let mut grid: SegmentGrid<u32> =
        SegmentGrid::with_dimensions(bbox, 100, 100).expect("valid grid configuration");

    // Edge 1: a straight east-west street.
    grid.add_segment(1, Line::new((100.0, 250.0), (600.0, 250.0)))
        .expect("edge 1 lies inside the tile");

    // Edge 2: a diagonal connector, two polyline legs under one id.
    grid.add_segment(2, Line::new((200.0, 200.0), (350.0, 310.0)))
        .expect("edge 2 leg 1 lies inside the tile");
    grid.add_segment(2, Line::new((350.0, 310.0), (500.0, 480.0)))
        .expect("edge 2 leg 2 lies inside the tile");

    // Edge 3: a street just east of the viewport. It shares the viewport's
    // boundary column of cells, so only the exact filter rules it out.
    grid.add_segment(3, Line::new((425.0, 260.0), (425.0, 300.0)))
        .expect("edge 3 lies inside the tile");

    println!("{grid:?}");

    let viewport = Rect::new(180.0, 210.0, 420.0, 330.0);
    let exact = grid.query_sorted(viewport, &QueryParams::default());
    let approx = grid.query_sorted(viewport, &QueryParams { exact: false });

    println!("viewport: {viewport:?}");
    println!("exact hits:       {exact:?}");
    println!("approximate hits: {approx:?}");

    for id in exact {
        let segments = grid.segments_for(id).unwrap_or_default();
        println!("edge {id}: {} segment(s) retained", segments.len());
    }
}
