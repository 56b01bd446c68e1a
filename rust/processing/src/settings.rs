// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Engine settings, read once at startup by the host.

use serde::{Deserialize, Serialize};

/// Names of the coordinate frames the engine works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameNames {
    /// Frame the sensor reports points in.
    pub camera: String,
    /// Robot body frame.
    pub robot: String,
    /// Fixed world frame staircases are rendered in.
    pub world: String,
}

impl Default for FrameNames {
    fn default() -> Self {
        Self {
            camera: "camera".into(),
            robot: "base_link".into(),
            world: "world".into(),
        }
    }
}

/// Parameters handed to the slab fitter with every cluster.
///
/// The built-in bounding-box fitter only bounds clusters; segmenting
/// fitters use the thresholds to accept or reject step candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationSettings {
    /// Camera mount height above the ground plane in meters.
    pub camera_height_above_ground: f64,
    /// Widest step accepted, in meters.
    pub max_step_width: f64,
    /// Lowest riser accepted, in meters.
    pub min_step_height: f64,
    /// Highest riser accepted, in meters.
    pub max_step_height: f64,
    /// Plane segmentation iterations.
    pub iterations: u32,
    /// Plane segmentation distance threshold in meters.
    pub threshold: f64,
}

impl Default for SegmentationSettings {
    fn default() -> Self {
        Self {
            camera_height_above_ground: 0.0,
            max_step_width: 5.0,
            min_step_height: 0.1,
            max_step_height: 0.3,
            iterations: 100,
            threshold: 0.02,
        }
    }
}

/// Output channel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Channel name for visible step outlines.
    pub steps_topic: String,
    /// Channel name for staircase wireframes.
    pub stairs_topic: String,
    pub publish_steps: bool,
    pub publish_stairs: bool,
    /// Marker namespace label.
    pub namespace: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            steps_topic: "steps".into(),
            stairs_topic: "stairs".into(),
            publish_steps: true,
            publish_stairs: true,
            namespace: "stairs".into(),
        }
    }
}

/// Everything the engine needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Input stream sensor frames arrive on.
    pub input_topic: String,
    pub frames: FrameNames,
    pub channels: ChannelSettings,
    pub segmentation: SegmentationSettings,
    /// Seed the registry with synthetic staircases.
    pub use_sample_data: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            input_topic: "cloud".into(),
            frames: FrameNames::default(),
            channels: ChannelSettings::default(),
            segmentation: SegmentationSettings::default(),
            use_sample_data: false,
        }
    }
}
