// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capability interfaces the host transport dispatches into.
//!
//! The host delivers one call at a time; mutating capabilities take
//! `&mut self` so a shared engine has to sit behind a single lock.

use crate::error::Result;
use crate::ingest::{FrameSummary, SensorFrame};
use stairs_geometry::Staircase;

/// Sensor frame arrival.
pub trait FrameConsumer {
    fn consume_frame(&mut self, frame: SensorFrame) -> Result<FrameSummary>;
}

/// `ExportStairs`: current registry contents.
pub trait StairExporter {
    fn export_stairs(&self) -> Vec<Staircase>;
}

/// `ImportStairs`: replace the registry wholesale.
pub trait StairImporter {
    /// Returns the number of staircases installed. On error the registry is
    /// unchanged.
    fn import_stairs(&mut self, staircases: Vec<Staircase>) -> Result<usize>;
}

/// `ClearStairs`: empty the registry.
pub trait StairClearer {
    fn clear_stairs(&mut self) -> Result<()>;
}
