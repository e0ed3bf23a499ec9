// Copyright 2026 the Wayline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for grid construction and insertion.

use core::fmt;

use kurbo::Point;

/// Errors reported by [`SegmentGrid`][crate::SegmentGrid].
///
/// Construction and insertion are the only fallible operations. Queries never
/// fail: a query box outside the grid simply yields an empty result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridError {
    /// Grid construction parameters were invalid: non-positive cell dimensions
    /// or counts, or a degenerate/inverted bounding box.
    ///
    /// Not recoverable; the grid cannot be built from these inputs.
    Configuration(&'static str),
    /// A segment endpoint lies outside the grid's bounding box.
    ///
    /// Carries the offending endpoint. Reported per insertion; the caller can
    /// clip the segment to the grid's coverage region and retry, or skip the
    /// item. The grid performs no implicit clipping.
    OutOfBounds(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid grid configuration: {msg}"),
            Self::OutOfBounds(p) => {
                write!(f, "segment endpoint ({}, {}) outside grid bounds", p.x, p.y)
            }
        }
    }
}

impl core::error::Error for GridError {}
