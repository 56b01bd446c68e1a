// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use serde::{Deserialize, Serialize};
use stairs_geometry::Staircase;
use stairs_processing::FrameSummary;

/// Reply of the mutating stairs services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub success: bool,
    /// Staircases held by the registry after the call.
    pub staircases: usize,
}

/// Registry contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StairsResponse {
    pub staircases: Vec<Staircase>,
    /// Total number of steps across all staircases.
    pub step_count: usize,
}

/// Reply to a sensor frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameResponse {
    pub topic: String,
    #[serde(flatten)]
    pub summary: FrameSummary,
    /// Processing time (ms).
    pub processing_time_ms: u64,
}
