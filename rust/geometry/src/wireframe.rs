// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-list markers for steps and staircases
//!
//! One marker per entity class and publish: every step outline goes into a
//! single blue marker, every staircase wireframe into a single green one.
//! Both reuse id 0 so each publish overwrites the previous one.

use crate::error::Result;
use crate::slab::{Slab, Staircase};
use crate::step::{
    corners_of, outline_edges, riser_edges, wireframe_point_count, Corners, OUTLINE_POINTS,
};
use crate::transform::Projection;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Line width used for every marker
pub const LINE_WIDTH: f64 = 0.05;

/// RGBA color in 0-1 range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Step outlines
    pub const STEPS: Color = Color::rgb(0.0, 0.0, 1.0);

    /// Staircase wireframes
    pub const STAIRS: Color = Color::rgb(0.0, 1.0, 0.0);
}

/// How long a marker stays visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// Until replaced by the next publish
    #[default]
    Forever,
    For(Duration),
}

/// Flat list of points consumed pairwise as independent segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineList {
    pub frame_id: String,
    pub namespace: String,
    pub id: i32,
    pub points: Vec<Point3<f64>>,
    pub color: Color,
    /// Line width
    pub scale: f64,
    pub lifetime: Lifetime,
}

impl LineList {
    /// Get the number of segments
    pub fn segment_count(&self) -> usize {
        self.points.len() / 2
    }

    /// Check if the marker draws nothing
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Builds line-list markers from slabs
#[derive(Debug, Clone)]
pub struct WireframeAssembler {
    frame_id: String,
    namespace: String,
    projection: Projection,
}

impl WireframeAssembler {
    /// Create an assembler emitting markers in `frame_id`.
    ///
    /// `projection` must bring slabs from their stored frame into `frame_id`.
    pub fn new(frame_id: &str, namespace: &str, projection: Projection) -> Self {
        Self {
            frame_id: frame_id.to_string(),
            namespace: namespace.to_string(),
            projection,
        }
    }

    /// Outlines of a flat list of steps, in input order
    pub fn build_step_outlines(&self, slabs: &[Slab]) -> Result<LineList> {
        let mut points = Vec::with_capacity(slabs.len() * OUTLINE_POINTS);
        for slab in slabs {
            let corners = self.corners(slab)?;
            points.extend_from_slice(&outline_edges(&corners));
        }
        Ok(self.marker(points, Color::STEPS))
    }

    /// Wireframe of one staircase: every front face, then every riser
    pub fn build_staircase_wireframe(&self, staircase: &Staircase) -> Result<LineList> {
        let mut points = Vec::with_capacity(wireframe_point_count(staircase.len()));
        self.append_staircase(staircase, &mut points)?;
        Ok(self.marker(points, Color::STAIRS))
    }

    /// Wireframes of several staircases concatenated into one marker
    pub fn build_staircases_wireframe(&self, staircases: &[Staircase]) -> Result<LineList> {
        let total = staircases
            .iter()
            .map(|s| wireframe_point_count(s.len()))
            .sum();
        let mut points = Vec::with_capacity(total);
        for staircase in staircases {
            self.append_staircase(staircase, &mut points)?;
        }
        Ok(self.marker(points, Color::STAIRS))
    }

    fn append_staircase(&self, staircase: &Staircase, points: &mut Vec<Point3<f64>>) -> Result<()> {
        let corners = staircase
            .iter()
            .map(|slab| self.corners(slab))
            .collect::<Result<Vec<Corners>>>()?;

        for c in &corners {
            points.extend_from_slice(&outline_edges(c));
        }
        for pair in corners.windows(2) {
            points.extend_from_slice(&riser_edges(&pair[0], &pair[1]));
        }
        Ok(())
    }

    #[inline]
    fn corners(&self, slab: &Slab) -> Result<Corners> {
        let projected = self.projection.project_slab(slab)?;
        Ok(corners_of(&projected))
    }

    fn marker(&self, points: Vec<Point3<f64>>, color: Color) -> LineList {
        LineList {
            frame_id: self.frame_id.clone(),
            namespace: self.namespace.clone(),
            id: 0,
            points,
            color,
            scale: LINE_WIDTH,
            lifetime: Lifetime::Forever,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LookupError};
    use crate::frame::to_display;
    use crate::frames::{FrameLookup, StaticFrameTree, TimeQuery};
    use crate::transform::RigidTransformer;
    use approx::assert_relative_eq;
    use nalgebra::{Isometry3, Vector3};
    use std::sync::Arc;

    fn slab(min: [f64; 3], max: [f64; 3]) -> Slab {
        Slab::new(Point3::from(min), Point3::from(max)).unwrap()
    }

    fn two_step_staircase() -> Staircase {
        Staircase::from_steps(vec![
            slab([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            slab([0.0, 0.0, 1.0], [1.0, 1.0, 2.0]),
        ])
    }

    fn display_assembler() -> WireframeAssembler {
        WireframeAssembler::new("camera", "stairs", Projection::Display)
    }

    #[test]
    fn test_marker_metadata() {
        let marker = display_assembler()
            .build_step_outlines(&[slab([0.0; 3], [1.0; 3])])
            .unwrap();
        assert_eq!(marker.frame_id, "camera");
        assert_eq!(marker.namespace, "stairs");
        assert_eq!(marker.id, 0);
        assert_eq!(marker.color, Color::STEPS);
        assert_eq!(marker.lifetime, Lifetime::Forever);
        assert_relative_eq!(marker.scale, LINE_WIDTH);
    }

    #[test]
    fn test_step_outlines_concatenate_in_order() {
        let slabs = vec![
            slab([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            slab([0.0, 0.0, 1.0], [1.0, 1.0, 2.0]),
            slab([0.0, 0.0, 2.0], [1.0, 1.0, 3.0]),
        ];
        let marker = display_assembler().build_step_outlines(&slabs).unwrap();

        assert_eq!(marker.points.len(), 3 * OUTLINE_POINTS);
        assert_eq!(marker.segment_count(), 12);
        // Each outline starts at its projected min corner
        for (i, s) in slabs.iter().enumerate() {
            assert_eq!(marker.points[i * OUTLINE_POINTS], to_display(&s.min()));
        }
    }

    #[test]
    fn test_empty_inputs_give_empty_markers() {
        let assembler = display_assembler();
        assert!(assembler.build_step_outlines(&[]).unwrap().is_empty());
        assert!(assembler.build_staircase_wireframe(&Staircase::new()).unwrap().is_empty());
        assert!(assembler.build_staircases_wireframe(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_staircase_wireframe_point_count() {
        let assembler = display_assembler();
        for n in 1..6 {
            let staircase: Staircase = (0..n)
                .map(|i| slab([0.0, 0.0, i as f64], [1.0, 1.0, i as f64 + 1.0]))
                .collect();
            let marker = assembler.build_staircase_wireframe(&staircase).unwrap();
            assert_eq!(marker.points.len(), 8 * n + 4 * (n - 1));
            assert_eq!(marker.color, Color::STAIRS);
        }
    }

    #[test]
    fn test_staircase_wireframe_layout() {
        let staircase = two_step_staircase();
        let marker = display_assembler().build_staircase_wireframe(&staircase).unwrap();
        assert_eq!(marker.points.len(), 20);

        let lower = corners_of(&Projection::Display.project_slab(&staircase.steps[0]).unwrap());
        let upper = corners_of(&Projection::Display.project_slab(&staircase.steps[1]).unwrap());

        assert_eq!(&marker.points[0..8], &outline_edges(&lower)[..]);
        assert_eq!(&marker.points[8..16], &outline_edges(&upper)[..]);
        assert_eq!(&marker.points[16..20], &riser_edges(&lower, &upper)[..]);
    }

    #[test]
    fn test_multiple_staircases_share_one_marker() {
        let staircases = vec![two_step_staircase(), two_step_staircase(), Staircase::new()];
        let marker = display_assembler()
            .build_staircases_wireframe(&staircases)
            .unwrap();
        assert_eq!(marker.points.len(), 40);
        assert_eq!(marker.id, 0);
    }

    #[test]
    fn test_rigid_projection_offsets_every_point() {
        let mut tree = StaticFrameTree::new();
        tree.insert_translation("world", "camera", Vector3::new(0.0, 0.0, 1.5)).unwrap();
        let transformer = RigidTransformer::new(Arc::new(tree));
        let projection = Projection::rigid(transformer, "world", "camera");
        let world = WireframeAssembler::new("world", "stairs", projection);

        let staircase = two_step_staircase();
        let local = display_assembler().build_staircase_wireframe(&staircase).unwrap();
        let shifted = world.build_staircase_wireframe(&staircase).unwrap();

        assert_eq!(shifted.frame_id, "world");
        for (a, b) in local.points.iter().zip(&shifted.points) {
            assert_relative_eq!(b - a, Vector3::new(0.0, 0.0, 1.5), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lookup_failure_aborts_whole_marker() {
        struct NoFrames;
        impl FrameLookup for NoFrames {
            fn lookup(
                &self,
                _: &str,
                s: &str,
                _: TimeQuery,
            ) -> std::result::Result<Isometry3<f64>, LookupError> {
                Err(LookupError::UnknownFrame(s.to_string()))
            }
        }

        let transformer = RigidTransformer::new(Arc::new(NoFrames));
        let projection = Projection::rigid(transformer, "world", "camera");
        let world = WireframeAssembler::new("world", "stairs", projection);
        let err = world
            .build_staircase_wireframe(&two_step_staircase())
            .unwrap_err();
        assert!(matches!(err, Error::FrameLookupFailed { .. }));
    }
}
