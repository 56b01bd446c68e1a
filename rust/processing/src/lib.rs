// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stairs processing pipeline.
//!
//! Holds the staircase registry, turns sensor frames into slabs and
//! staircases, and builds the per-tick markers handed to a render sink.
//! Hosts drive it through the capability traits in [`services`].

pub mod engine;
pub mod error;
pub mod ingest;
pub mod publish;
pub mod registry;
pub mod sample;
pub mod services;
pub mod settings;
pub mod snapshot;

pub use engine::StairsEngine;
pub use error::{Error, Result};
pub use ingest::{AabbFitter, FrameSummary, SensorFrame, SlabFitter};
pub use publish::{Channel, ChannelOutcome, MarkerSink, NullSink, PublishReport};
pub use registry::{RegistrySnapshot, StaircaseRegistry};
pub use sample::sample_staircases;
pub use services::{FrameConsumer, StairClearer, StairExporter, StairImporter};
pub use settings::{ChannelSettings, EngineSettings, FrameNames, SegmentationSettings};
pub use snapshot::{load_snapshot, save_snapshot, StairsSnapshot};
