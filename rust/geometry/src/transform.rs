// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-frame transforms for step geometry
//!
//! [`RigidTransformer`] moves points between named frames through a
//! [`FrameLookup`]. [`Projection`] chains the axis remap and the optional
//! rigid transform so that slabs land in the output space before their
//! corners are derived.

use crate::error::{Error, Result};
use crate::frame::to_display;
use crate::frames::{FrameLookup, TimeQuery};
use crate::slab::Slab;
use nalgebra::{Isometry3, Point3};
use std::fmt;
use std::sync::Arc;

/// Applies looked-up frame transforms to points
#[derive(Clone)]
pub struct RigidTransformer {
    lookup: Option<Arc<dyn FrameLookup>>,
}

impl RigidTransformer {
    /// Transformer backed by a live lookup collaborator
    pub fn new(lookup: Arc<dyn FrameLookup>) -> Self {
        Self {
            lookup: Some(lookup),
        }
    }

    /// Transformer without a collaborator; every call fails with
    /// [`Error::TransformUnavailable`]
    pub fn unavailable() -> Self {
        Self { lookup: None }
    }

    /// Whether a lookup collaborator is attached
    pub fn is_available(&self) -> bool {
        self.lookup.is_some()
    }

    /// Resolve the isometry mapping `source_frame` points into `target_frame`.
    pub fn resolve(
        &self,
        target_frame: &str,
        source_frame: &str,
        at: TimeQuery,
    ) -> Result<Isometry3<f64>> {
        let lookup = self.lookup.as_ref().ok_or(Error::TransformUnavailable)?;
        lookup
            .lookup(target_frame, source_frame, at)
            .map_err(|cause| Error::FrameLookupFailed {
                target_frame: target_frame.to_string(),
                source_frame: source_frame.to_string(),
                cause,
            })
    }

    /// Move a point from `source_frame` into `target_frame` using the latest
    /// available transform.
    pub fn transform(
        &self,
        point: &Point3<f64>,
        target_frame: &str,
        source_frame: &str,
    ) -> Result<Point3<f64>> {
        self.transform_at(point, target_frame, source_frame, TimeQuery::Latest)
    }

    /// Move a point from `source_frame` into `target_frame` at a given time.
    pub fn transform_at(
        &self,
        point: &Point3<f64>,
        target_frame: &str,
        source_frame: &str,
        at: TimeQuery,
    ) -> Result<Point3<f64>> {
        let iso = self.resolve(target_frame, source_frame, at)?;
        Ok(iso * point)
    }
}

impl fmt::Debug for RigidTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RigidTransformer")
            .field("available", &self.is_available())
            .finish()
    }
}

/// How slab corners reach the output space
#[derive(Debug, Clone)]
pub enum Projection {
    /// Axis remap into display convention, same frame
    Display,
    /// Axis remap, then a rigid transform into another frame
    Rigid {
        transformer: RigidTransformer,
        target_frame: String,
        source_frame: String,
    },
}

impl Projection {
    /// Axis remap followed by a transform from `source_frame` to `target_frame`
    pub fn rigid(transformer: RigidTransformer, target_frame: &str, source_frame: &str) -> Self {
        Projection::Rigid {
            transformer,
            target_frame: target_frame.to_string(),
            source_frame: source_frame.to_string(),
        }
    }

    /// Project a single point
    pub fn project_point(&self, point: &Point3<f64>) -> Result<Point3<f64>> {
        let display = to_display(point);
        match self {
            Projection::Display => Ok(display),
            Projection::Rigid {
                transformer,
                target_frame,
                source_frame,
            } => transformer.transform(&display, target_frame, source_frame),
        }
    }

    /// Project both corners of a slab. Fails as a whole, never half-converted.
    pub fn project_slab(&self, slab: &Slab) -> Result<Slab> {
        match self {
            Projection::Display => slab.map_corners(|p| Ok(to_display(p))),
            Projection::Rigid {
                transformer,
                target_frame,
                source_frame,
            } => {
                // One lookup per slab keeps both corners on the same transform
                let iso = transformer.resolve(target_frame, source_frame, TimeQuery::Latest)?;
                slab.map_corners(|p| Ok(iso * to_display(p)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::frames::StaticFrameTree;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    struct FailingLookup;

    impl FrameLookup for FailingLookup {
        fn lookup(
            &self,
            _: &str,
            _: &str,
            _: TimeQuery,
        ) -> std::result::Result<Isometry3<f64>, LookupError> {
            Err(LookupError::Backend("extrapolation into the future".into()))
        }
    }

    fn camera_tree() -> Arc<StaticFrameTree> {
        let mut tree = StaticFrameTree::new();
        tree.insert_translation("world", "camera", Vector3::new(1.0, 2.0, 3.0)).unwrap();
        Arc::new(tree)
    }

    #[test]
    fn test_transform_adds_translation() {
        let transformer = RigidTransformer::new(camera_tree());
        let p = transformer
            .transform(&Point3::new(0.5, 0.5, 0.5), "world", "camera")
            .unwrap();
        assert_relative_eq!(p, Point3::new(1.5, 2.5, 3.5), epsilon = 1e-12);
    }

    #[test]
    fn test_transform_unavailable() {
        let transformer = RigidTransformer::unavailable();
        let err = transformer
            .transform(&Point3::origin(), "world", "camera")
            .unwrap_err();
        assert_eq!(err, Error::TransformUnavailable);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_lookup_failure_names_both_frames() {
        let transformer = RigidTransformer::new(Arc::new(FailingLookup));
        let err = transformer
            .transform(&Point3::origin(), "world", "camera")
            .unwrap_err();

        assert!(err.is_recoverable());
        let message = err.to_string();
        assert!(message.contains("'world'"));
        assert!(message.contains("'camera'"));
        match err {
            Error::FrameLookupFailed {
                target_frame,
                source_frame,
                cause,
            } => {
                assert_eq!(target_frame, "world");
                assert_eq!(source_frame, "camera");
                assert_eq!(cause, LookupError::Backend("extrapolation into the future".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_projection_of_slab() {
        let slab = Slab::new(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.5, 2.0)).unwrap();
        let projected = Projection::Display.project_slab(&slab).unwrap();
        assert_eq!(projected.min(), Point3::new(1.0, -0.0, -0.0));
        assert_eq!(projected.max(), Point3::new(2.0, -1.0, -0.5));
    }

    #[test]
    fn test_rigid_projection_remaps_then_translates() {
        let projection = Projection::rigid(RigidTransformer::new(camera_tree()), "world", "camera");

        let p = projection.project_point(&Point3::new(1.0, 0.0, 0.0)).unwrap();
        // right in sensor axes is (0, -1, 0) on display, then offset
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_rigid_projection_failure_leaves_no_partial_slab() {
        let transformer = RigidTransformer::new(Arc::new(FailingLookup));
        let projection = Projection::rigid(transformer, "world", "camera");
        let slab = Slab::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(projection.project_slab(&slab).is_err());
    }
}
