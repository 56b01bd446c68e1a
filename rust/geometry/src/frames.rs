// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named coordinate frames
//!
//! [`FrameLookup`] is the seam to whatever resolves the rigid transform
//! between two named frames. [`StaticFrameTree`] is the in-process
//! implementation used when all frames are fixed relative to each other.

use crate::error::LookupError;
use nalgebra::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which transform to resolve when frames move over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeQuery {
    /// Most recent transform available
    #[default]
    Latest,
    /// Transform at a timestamp, measured since the Unix epoch
    At(Duration),
}

/// Resolves the rigid transform between two named frames.
///
/// The returned isometry maps points expressed in `source_frame` into
/// `target_frame`. Implementations may block; callers bound latency through
/// the implementation's own timeout.
pub trait FrameLookup: Send + Sync {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        at: TimeQuery,
    ) -> Result<Isometry3<f64>, LookupError>;
}

/// One fixed parent -> child edge, as read from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticTransform {
    pub parent: String,
    pub child: String,
    /// Child origin expressed in the parent frame
    pub translation: [f64; 3],
    /// Child orientation as a quaternion `[x, y, z, w]`; identity when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 4]>,
}

impl StaticTransform {
    /// Pure translation edge
    pub fn translation(parent: &str, child: &str, translation: [f64; 3]) -> Self {
        Self {
            parent: parent.to_string(),
            child: child.to_string(),
            translation,
            rotation: None,
        }
    }

    /// Pose of the child in the parent frame.
    ///
    /// Fails on non-finite components or a rotation that cannot be
    /// normalised.
    pub fn pose(&self) -> Result<Isometry3<f64>, LookupError> {
        let invalid = |reason: &str| LookupError::InvalidTransform {
            parent: self.parent.clone(),
            child: self.child.clone(),
            reason: reason.to_string(),
        };

        if self.translation.iter().any(|c| !c.is_finite()) {
            return Err(invalid("translation is not finite"));
        }
        let [x, y, z] = self.translation;

        let rotation = match self.rotation {
            Some([qx, qy, qz, qw]) => {
                let q = Quaternion::new(qw, qx, qy, qz);
                if q.coords.iter().any(|c| !c.is_finite()) {
                    return Err(invalid("rotation is not finite"));
                }
                UnitQuaternion::try_new(q, f64::EPSILON)
                    .ok_or_else(|| invalid("rotation quaternion has zero norm"))?
            }
            None => UnitQuaternion::identity(),
        };
        Ok(Isometry3::from_parts(Translation3::new(x, y, z), rotation))
    }
}

/// Tree of frames with fixed relative poses
#[derive(Debug, Clone, Default)]
pub struct StaticFrameTree {
    /// child -> (parent, pose of child in parent)
    edges: FxHashMap<String, (String, Isometry3<f64>)>,
}

impl StaticFrameTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a list of edges, in order
    pub fn from_transforms(transforms: &[StaticTransform]) -> Result<Self, LookupError> {
        let mut tree = Self::new();
        for t in transforms {
            tree.insert(&t.parent, &t.child, t.pose()?)?;
        }
        Ok(tree)
    }

    /// Attach `child` to `parent`. Re-attaching an existing child replaces its edge.
    pub fn insert(
        &mut self,
        parent: &str,
        child: &str,
        pose: Isometry3<f64>,
    ) -> Result<(), LookupError> {
        if parent == child || self.chain(parent).iter().any(|f| f == child) {
            return Err(LookupError::Cycle {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        self.edges
            .insert(child.to_string(), (parent.to_string(), pose));
        Ok(())
    }

    /// Attach `child` to `parent` with a pure offset
    pub fn insert_translation(
        &mut self,
        parent: &str,
        child: &str,
        offset: Vector3<f64>,
    ) -> Result<(), LookupError> {
        self.insert(parent, child, Isometry3::translation(offset.x, offset.y, offset.z))
    }

    /// Whether the frame appears anywhere in the tree
    pub fn contains(&self, frame: &str) -> bool {
        self.edges.contains_key(frame) || self.edges.values().any(|(parent, _)| parent == frame)
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the tree has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Frames from `frame` up to its root, inclusive
    fn chain(&self, frame: &str) -> Vec<String> {
        let mut chain = vec![frame.to_string()];
        let mut current = frame;
        while let Some((parent, _)) = self.edges.get(current) {
            chain.push(parent.clone());
            current = parent.as_str();
        }
        chain
    }

    /// Root of `frame` and the pose of `frame` expressed in that root
    fn to_root(&self, frame: &str) -> (String, Isometry3<f64>) {
        let mut pose = Isometry3::identity();
        let mut current = frame;
        while let Some((parent, edge)) = self.edges.get(current) {
            pose = edge * pose;
            current = parent.as_str();
        }
        (current.to_string(), pose)
    }
}

impl FrameLookup for StaticFrameTree {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        _at: TimeQuery,
    ) -> Result<Isometry3<f64>, LookupError> {
        if target_frame == source_frame {
            return Ok(Isometry3::identity());
        }
        for frame in [target_frame, source_frame] {
            if !self.contains(frame) {
                return Err(LookupError::UnknownFrame(frame.to_string()));
            }
        }

        let (target_root, root_from_target) = self.to_root(target_frame);
        let (source_root, root_from_source) = self.to_root(source_frame);
        if target_root != source_root {
            return Err(LookupError::Disconnected {
                target_frame: target_frame.to_string(),
                source_frame: source_frame.to_string(),
            });
        }

        Ok(root_from_target.inverse() * root_from_source)
    }
}
