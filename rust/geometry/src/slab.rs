// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step slabs and staircases
//!
//! A [`Slab`] is the axis-aligned bounding box of one detected step tread.
//! A [`Staircase`] is an ordered run of slabs, bottom tread first. The order
//! is load-bearing: riser geometry connects neighbours in this order, so no
//! operation in this crate ever sorts it.

use crate::error::{Error, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// One step tread as an axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlabBounds", into = "SlabBounds")]
pub struct Slab {
    min: Point3<f64>,
    max: Point3<f64>,
}

/// Wire representation of a slab, validated on the way in
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SlabBounds {
    min: Point3<f64>,
    max: Point3<f64>,
}

impl TryFrom<SlabBounds> for Slab {
    type Error = Error;

    fn try_from(bounds: SlabBounds) -> Result<Self> {
        Slab::new(bounds.min, bounds.max)
    }
}

impl From<Slab> for SlabBounds {
    fn from(slab: Slab) -> Self {
        Self {
            min: slab.min,
            max: slab.max,
        }
    }
}

impl Slab {
    /// Create a slab from its component-wise minimum and maximum corners.
    ///
    /// Zero-extent boxes are accepted; inverted or non-finite bounds are not.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Result<Self> {
        if min.iter().chain(max.iter()).any(|c| !c.is_finite()) {
            return Err(Error::InvalidSlab(format!(
                "non-finite bounds min={:?} max={:?}",
                min.coords.as_slice(),
                max.coords.as_slice()
            )));
        }

        for (axis, name) in ["x", "y", "z"].iter().enumerate() {
            if min[axis] > max[axis] {
                return Err(Error::InvalidSlab(format!(
                    "min.{name} ({}) exceeds max.{name} ({})",
                    min[axis], max[axis]
                )));
            }
        }

        Ok(Self { min, max })
    }

    /// Bounding box of a point cluster.
    ///
    /// Returns `None` for an empty cluster or one containing non-finite points.
    pub fn fit(points: &[Point3<f64>]) -> Option<Self> {
        if points.iter().flat_map(|p| p.iter()).any(|c| !c.is_finite()) {
            return None;
        }

        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;

        for p in &points[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        Self::new(min, max).ok()
    }

    /// Minimum corner
    #[inline]
    pub fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Maximum corner
    #[inline]
    pub fn max(&self) -> Point3<f64> {
        self.max
    }

    /// Box extent along each axis
    #[inline]
    pub fn extent(&self) -> nalgebra::Vector3<f64> {
        self.max - self.min
    }

    /// Map both corners through `f`, producing a new slab.
    ///
    /// The result carries the images of `min` and `max` as-is. It is not
    /// re-normalised, so corner derivation on the mapped slab stays anchored
    /// to the original min/max pair even when an axis flips sign.
    pub fn map_corners<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&Point3<f64>) -> Result<Point3<f64>>,
    {
        let min = f(&self.min)?;
        let max = f(&self.max)?;
        Ok(Self { min, max })
    }
}

/// Ordered sequence of slabs, bottom tread first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Staircase {
    pub steps: Vec<Slab>,
}

impl Staircase {
    /// Create an empty staircase
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Create a staircase from already ordered steps
    pub fn from_steps(steps: Vec<Slab>) -> Self {
        Self { steps }
    }

    /// Append a step on top
    pub fn push(&mut self, slab: Slab) {
        self.steps.push(slab);
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the staircase has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate steps bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &Slab> {
        self.steps.iter()
    }
}

impl FromIterator<Slab> for Staircase {
    fn from_iter<I: IntoIterator<Item = Slab>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
