// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Render sink types used by the publish tick.

use serde::{Deserialize, Serialize};
use stairs_geometry::LineList;
use std::fmt;
use std::sync::Arc;

/// Logical output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Outlines of the steps visible in the latest sensor frame.
    Steps,
    /// Wireframes of every registered staircase.
    Stairs,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Steps => write!(f, "steps"),
            Channel::Stairs => write!(f, "stairs"),
        }
    }
}

/// Receives markers produced by the publish tick.
pub trait MarkerSink: Send + Sync {
    fn publish(&self, channel: Channel, marker: LineList);
}

impl<T: MarkerSink + ?Sized> MarkerSink for Arc<T> {
    fn publish(&self, channel: Channel, marker: LineList) {
        (**self).publish(channel, marker)
    }
}

/// Sink that drops everything, for hosts without a renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MarkerSink for NullSink {
    fn publish(&self, _channel: Channel, _marker: LineList) {}
}

/// What happened to one channel during a publish tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelOutcome {
    /// Marker handed to the sink.
    Published { points: usize },
    /// Channel switched off in configuration.
    Disabled,
    /// Marker could not be built this tick.
    Skipped { reason: String },
}

impl ChannelOutcome {
    /// Whether a marker was handed to the sink.
    pub fn is_published(&self) -> bool {
        matches!(self, ChannelOutcome::Published { .. })
    }
}

/// Per-channel outcome of one publish tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishReport {
    pub steps: ChannelOutcome,
    pub stairs: ChannelOutcome,
}
