// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis convention remapping
//!
//! Depth sensors report points with x = right, y = down, z = forward.
//! Rendering and the world frame use x = forward, y = left, z = up.
//! Both maps are signed axis permutations, so the round trip is exact.

use nalgebra::Point3;

/// Sensor convention to display/world convention
#[inline]
pub fn to_display(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(p.z, -p.x, -p.y)
}

/// Display/world convention to sensor convention
#[inline]
pub fn to_sensor(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(-p.y, -p.z, p.x)
}
