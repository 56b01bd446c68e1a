// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor frame ingestion.
//!
//! A [`SensorFrame`] carries the point clusters segmented from one sensor
//! frame, in sensor-axis convention, plus the staircase groups an external
//! classifier assigned them to. Each cluster becomes one [`Slab`] through a
//! [`SlabFitter`].

use crate::error::{Error, Result};
use crate::settings::SegmentationSettings;
use serde::{Deserialize, Serialize};
use stairs_geometry::{Point3, Slab, Staircase};

/// Clusters and staircase groups from one sensor frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Capture time in seconds since the Unix epoch, when known.
    #[serde(default)]
    pub stamp: Option<f64>,
    /// One point cluster per step candidate.
    pub clusters: Vec<Vec<Point3<f64>>>,
    /// Staircases found in this frame, each a bottom-to-top list of
    /// indices into `clusters`.
    #[serde(default)]
    pub staircases: Vec<Vec<usize>>,
}

/// Turns a point cluster into a step slab.
pub trait SlabFitter: Send + Sync {
    /// `None` when the cluster does not yield a slab.
    fn fit(&self, cluster: &[Point3<f64>], settings: &SegmentationSettings) -> Option<Slab>;
}

/// Axis-aligned bounding box of the whole cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct AabbFitter;

impl SlabFitter for AabbFitter {
    fn fit(&self, cluster: &[Point3<f64>], _settings: &SegmentationSettings) -> Option<Slab> {
        Slab::fit(cluster)
    }
}

/// Result of fitting one frame, not yet applied anywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FittedFrame {
    /// One slab per cluster, in cluster order.
    pub steps: Vec<Slab>,
    /// Staircases assembled from the classifier groups.
    pub staircases: Vec<Staircase>,
}

/// Counts reported back to the caller of a frame ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    pub slabs: usize,
    pub staircases_appended: usize,
}

/// Fit every cluster and resolve the staircase groups.
///
/// Fails as a whole: an unfittable cluster, an empty group or a group
/// pointing past the cluster list yields [`Error::MalformedRequest`] and
/// nothing else. Staircases accepted here are always importable.
pub fn fit_frame(
    frame: &SensorFrame,
    fitter: &dyn SlabFitter,
    settings: &SegmentationSettings,
) -> Result<FittedFrame> {
    let steps = frame
        .clusters
        .iter()
        .enumerate()
        .map(|(i, cluster)| {
            fitter.fit(cluster, settings).ok_or_else(|| {
                Error::MalformedRequest(format!(
                    "cluster {} ({} points) does not yield a slab",
                    i,
                    cluster.len()
                ))
            })
        })
        .collect::<Result<Vec<Slab>>>()?;

    let staircases = frame
        .staircases
        .iter()
        .enumerate()
        .map(|(g, group)| {
            if group.is_empty() {
                return Err(Error::MalformedRequest(format!("staircase {} has no steps", g)));
            }
            group
                .iter()
                .map(|&idx| {
                    steps.get(idx).copied().ok_or_else(|| {
                        Error::MalformedRequest(format!(
                            "staircase {} references cluster {} of {}",
                            g,
                            idx,
                            steps.len()
                        ))
                    })
                })
                .collect::<Result<Staircase>>()
        })
        .collect::<Result<Vec<Staircase>>>()?;

    Ok(FittedFrame { steps, staircases })
}
