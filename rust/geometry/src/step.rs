// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step front faces and risers
//!
//! Corner layout of a step front face:
//!
//! ```text
//!  p2-----------------p3
//!  |                   |
//!  |                   |
//!  p1-----------------p4
//! ```
//!
//! p1/p3 are the box's own min/max, p2/p4 swap the secondary (y) axis.
//! Inputs are expected in output space already (see
//! [`Projection`](crate::transform::Projection)).

use crate::slab::Slab;
use nalgebra::Point3;

/// Four front-face corners `[p1, p2, p3, p4]`
pub type Corners = [Point3<f64>; 4];

/// Points emitted per step outline (4 segments)
pub const OUTLINE_POINTS: usize = 8;

/// Points emitted per riser (2 segments)
pub const RISER_POINTS: usize = 4;

/// Front-face corners of a slab
#[inline]
pub fn corners_of(slab: &Slab) -> Corners {
    let min = slab.min();
    let max = slab.max();
    [
        min,
        Point3::new(min.x, max.y, min.z),
        max,
        Point3::new(max.x, min.y, max.z),
    ]
}

/// Closed outline as four independent segments: p1-p2, p2-p3, p3-p4, p4-p1
#[inline]
pub fn outline_edges(corners: &Corners) -> [Point3<f64>; OUTLINE_POINTS] {
    let [p1, p2, p3, p4] = *corners;
    [p1, p2, p2, p3, p3, p4, p4, p1]
}

/// Riser between two adjacent steps as two segments: upper.p1-lower.p2 and
/// upper.p4-lower.p3.
///
/// The pairing is crossed (1 with 2, 4 with 3), not parallel.
#[inline]
pub fn riser_edges(lower: &Corners, upper: &Corners) -> [Point3<f64>; RISER_POINTS] {
    [upper[0], lower[1], upper[3], lower[2]]
}

/// Number of line-list points produced for a staircase of `steps` slabs
#[inline]
pub fn wireframe_point_count(steps: usize) -> usize {
    steps * OUTLINE_POINTS + steps.saturating_sub(1) * RISER_POINTS
}
