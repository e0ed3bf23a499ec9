// Copyright 2026 the Wayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar geometry helpers shared by rasterization and range queries.
//!
//! These operate directly on [`kurbo`] primitives. They exist because the
//! grid treats its boundary as inclusive on all four edges, while
//! [`Rect::contains`] uses half-open fill semantics.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Line, Point, Rect};

/// Whether `rect` contains `p`, inclusive of all four edges.
#[inline]
pub fn contains_inclusive(rect: &Rect, p: Point) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

/// The intersection of two rectangles, or `None` when they are disjoint.
///
/// Rectangles that only touch along an edge or at a corner are not considered
/// disjoint; the result is then a zero-area rectangle.
#[inline]
pub fn clip_rect(a: &Rect, b: &Rect) -> Option<Rect> {
    let x0 = a.x0.max(b.x0);
    let y0 = a.y0.max(b.y0);
    let x1 = a.x1.min(b.x1);
    let y1 = a.y1.min(b.y1);
    (x0 <= x1 && y0 <= y1).then(|| Rect::new(x0, y0, x1, y1))
}

/// The intersection point of two line segments.
///
/// Returns `None` for parallel and collinear pairs, and for segment pairs
/// whose supporting lines cross outside either segment's extent. Endpoint
/// touches count as intersections.
pub fn segment_intersection(a: Line, b: Line) -> Option<Point> {
    let d1 = a.p1 - a.p0;
    let d2 = b.p1 - b.p0;
    let denom = d1.cross(d2);
    if denom == 0.0 {
        return None;
    }
    let w = b.p0 - a.p0;
    let t = w.cross(d2) / denom;
    let u = w.cross(d1) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a.p0 + d1 * t)
    } else {
        None
    }
}

/// Whether a segment intersects a rectangle, inclusive of the boundary.
///
/// True when an endpoint lies inside the rectangle or the segment crosses one
/// of its four edges. Used by the exact query filter to tighten cell-overlap
/// candidates to true geometric hits.
pub fn segment_intersects_rect(segment: Line, rect: &Rect) -> bool {
    if contains_inclusive(rect, segment.p0) || contains_inclusive(rect, segment.p1) {
        return true;
    }
    rect_edges(rect)
        .into_iter()
        .any(|edge| segment_intersection(segment, edge).is_some())
}

/// The four boundary edges of a rectangle: bottom, right, top, left.
#[inline]
pub fn rect_edges(rect: &Rect) -> [Line; 4] {
    [
        Line::new((rect.x0, rect.y0), (rect.x1, rect.y0)),
        Line::new((rect.x1, rect.y0), (rect.x1, rect.y1)),
        Line::new((rect.x1, rect.y1), (rect.x0, rect.y1)),
        Line::new((rect.x0, rect.y1), (rect.x0, rect.y0)),
    ]
}

/// The parameter `t` of a point along a segment, so that
/// `p = p0 + t * (p1 - p0)`.
///
/// Measured on the dominant axis for numeric stability. Only meaningful for
/// points on (or near) a non-degenerate segment; a degenerate segment yields
/// a non-finite value.
#[inline]
pub fn line_parameter(segment: Line, p: Point) -> f64 {
    let d = segment.p1 - segment.p0;
    if d.x.abs() > d.y.abs() {
        (p.x - segment.p0.x) / d.x
    } else {
        (p.y - segment.p0.y) / d.y
    }
}
