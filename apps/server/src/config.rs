// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use anyhow::Context;
use stairs_geometry::{LookupError, StaticFrameTree, StaticTransform};
use stairs_processing::{ChannelSettings, EngineSettings, FrameNames, SegmentationSettings};
use std::path::PathBuf;
use std::str::FromStr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Publish tick period in milliseconds.
    pub publish_interval_ms: u64,
    /// Engine settings derived from the environment.
    pub engine: EngineSettings,
    /// Static transforms from `FRAME_TREE`, if set.
    pub frame_tree: Option<Vec<StaticTransform>>,
    /// Snapshot file imported at startup.
    pub snapshot_path: Option<PathBuf>,
    /// Snapshot file written on graceful shutdown.
    pub snapshot_out: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparsable values fall back to their default. A malformed
    /// `FRAME_TREE` is an error.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = EngineSettings::default();
        let string = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let frames = FrameNames {
            camera: string("CAMERA_FRAME", &defaults.frames.camera),
            robot: string("ROBOT_FRAME", &defaults.frames.robot),
            world: string("WORLD_FRAME", &defaults.frames.world),
        };

        let channels = ChannelSettings {
            steps_topic: string("STEPS_TOPIC", &defaults.channels.steps_topic),
            stairs_topic: string("STAIRS_TOPIC", &defaults.channels.stairs_topic),
            publish_steps: flag(&var, "PUBLISH_STEPS", defaults.channels.publish_steps),
            publish_stairs: flag(&var, "PUBLISH_STAIRS", defaults.channels.publish_stairs),
            namespace: string("NAMESPACE", &defaults.channels.namespace),
        };

        let seg = &defaults.segmentation;
        let segmentation = SegmentationSettings {
            camera_height_above_ground: parsed(
                &var,
                "CAMERA_HEIGHT_ABOVE_GROUND",
                seg.camera_height_above_ground,
            ),
            max_step_width: parsed(&var, "MAX_STEP_WIDTH", seg.max_step_width),
            min_step_height: parsed(&var, "MIN_STEP_HEIGHT", seg.min_step_height),
            max_step_height: parsed(&var, "MAX_STEP_HEIGHT", seg.max_step_height),
            iterations: parsed(&var, "SEGMENTATION_ITERATIONS", seg.iterations),
            threshold: parsed(&var, "SEGMENTATION_THRESHOLD", seg.threshold),
        };

        let frame_tree = match var("FRAME_TREE") {
            Some(json) => Some(
                serde_json::from_str::<Vec<StaticTransform>>(&json)
                    .context("FRAME_TREE is not a JSON list of static transforms")?,
            ),
            None => None,
        };

        Ok(Self {
            port: parsed(&var, "PORT", 8080),
            request_timeout_secs: parsed(&var, "REQUEST_TIMEOUT_SECS", 30),
            publish_interval_ms: parsed::<u64>(&var, "PUBLISH_INTERVAL_MS", 500).max(1),
            engine: EngineSettings {
                input_topic: string("INPUT_TOPIC", &defaults.input_topic),
                frames,
                channels,
                segmentation,
                use_sample_data: flag(&var, "USE_SAMPLE_DATA", defaults.use_sample_data),
            },
            frame_tree,
            snapshot_path: var("STAIRS_SNAPSHOT").map(PathBuf::from),
            snapshot_out: var("STAIRS_SNAPSHOT_OUT").map(PathBuf::from),
        })
    }

    /// Build the static frame tree.
    ///
    /// Without `FRAME_TREE` the robot sits at the world origin and the
    /// camera is mounted straight above it.
    pub fn build_frame_tree(&self) -> Result<StaticFrameTree, LookupError> {
        match &self.frame_tree {
            Some(transforms) => StaticFrameTree::from_transforms(transforms),
            None => {
                let frames = &self.engine.frames;
                let height = self.engine.segmentation.camera_height_above_ground;
                StaticFrameTree::from_transforms(&[
                    StaticTransform::translation(&frames.world, &frames.robot, [0.0, 0.0, 0.0]),
                    StaticTransform::translation(&frames.robot, &frames.camera, [0.0, 0.0, height]),
                ])
            }
        }
    }
}

fn parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    var(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    match var(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("1" | "true" | "yes" | "on") => true,
        Some("0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
