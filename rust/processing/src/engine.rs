// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The stairs engine: registry, visible steps and the publish tick.

use crate::error::{Error, Result};
use crate::ingest::{fit_frame, AabbFitter, FrameSummary, SensorFrame, SlabFitter};
use crate::publish::{Channel, ChannelOutcome, MarkerSink, PublishReport};
use crate::registry::StaircaseRegistry;
use crate::sample::sample_staircases;
use crate::services::{FrameConsumer, StairClearer, StairExporter, StairImporter};
use crate::settings::EngineSettings;
use stairs_geometry::{LineList, Projection, RigidTransformer, Slab, Staircase, WireframeAssembler};
use std::sync::Arc;

/// Owns the engine state and implements every capability the host
/// dispatches into.
pub struct StairsEngine {
    settings: EngineSettings,
    registry: Arc<StaircaseRegistry>,
    visible_steps: Vec<Slab>,
    fitter: Box<dyn SlabFitter>,
    transformer: RigidTransformer,
    steps_assembler: WireframeAssembler,
    stairs_assembler: WireframeAssembler,
    sink: Box<dyn MarkerSink>,
}

impl StairsEngine {
    /// Create an engine with an empty registry (or the sample staircases,
    /// when enabled in `settings`).
    ///
    /// Visible steps are drawn in the camera frame; staircases are drawn in
    /// the world frame through `transformer`.
    pub fn new(
        settings: EngineSettings,
        transformer: RigidTransformer,
        sink: impl MarkerSink + 'static,
    ) -> Self {
        let frames = &settings.frames;
        let namespace = &settings.channels.namespace;

        let steps_assembler =
            WireframeAssembler::new(&frames.camera, namespace, Projection::Display);
        let stairs_assembler = WireframeAssembler::new(
            &frames.world,
            namespace,
            Projection::rigid(transformer.clone(), &frames.world, &frames.camera),
        );

        let registry = if settings.use_sample_data {
            let samples = sample_staircases();
            tracing::info!(staircases = samples.len(), "Seeding registry with sample data");
            StaircaseRegistry::with_staircases(samples)
        } else {
            StaircaseRegistry::new()
        };

        Self {
            settings,
            registry: Arc::new(registry),
            visible_steps: Vec::new(),
            fitter: Box::new(AabbFitter),
            transformer,
            steps_assembler,
            stairs_assembler,
            sink: Box::new(sink),
        }
    }

    /// Replace the slab fitter.
    pub fn with_fitter(mut self, fitter: impl SlabFitter + 'static) -> Self {
        self.fitter = Box::new(fitter);
        self
    }

    /// Shared handle to the registry.
    pub fn registry(&self) -> &Arc<StaircaseRegistry> {
        &self.registry
    }

    /// Steps fitted from the latest sensor frame.
    pub fn visible_steps(&self) -> &[Slab] {
        &self.visible_steps
    }

    /// Bootstrap check: staircase publishing needs a frame lookup.
    pub fn check_transforms(&self) -> Result<()> {
        if self.settings.channels.publish_stairs && !self.transformer.is_available() {
            return Err(Error::Geometry(stairs_geometry::Error::TransformUnavailable));
        }
        Ok(())
    }

    /// Build and hand over one marker per enabled channel.
    ///
    /// Failures only skip the affected channel; the registry is only read.
    pub fn publish_tick(&self) -> PublishReport {
        let channels = &self.settings.channels;

        let steps = if channels.publish_steps {
            let marker = self.steps_assembler.build_step_outlines(&self.visible_steps);
            self.publish_channel(Channel::Steps, marker)
        } else {
            ChannelOutcome::Disabled
        };

        let stairs = if channels.publish_stairs {
            let snapshot = self.registry.snapshot();
            let marker = self.stairs_assembler.build_staircases_wireframe(&snapshot);
            self.publish_channel(Channel::Stairs, marker)
        } else {
            ChannelOutcome::Disabled
        };

        PublishReport { steps, stairs }
    }

    fn publish_channel(
        &self,
        channel: Channel,
        marker: stairs_geometry::Result<LineList>,
    ) -> ChannelOutcome {
        match marker {
            Ok(marker) => {
                let points = marker.points.len();
                tracing::debug!(%channel, points, frame_id = %marker.frame_id, "Publishing marker");
                self.sink.publish(channel, marker);
                ChannelOutcome::Published { points }
            }
            Err(err) => {
                tracing::warn!(%channel, error = %err, "Skipping channel for this tick");
                ChannelOutcome::Skipped {
                    reason: err.to_string(),
                }
            }
        }
    }
}

impl FrameConsumer for StairsEngine {
    fn consume_frame(&mut self, frame: SensorFrame) -> Result<FrameSummary> {
        let fitted = fit_frame(&frame, self.fitter.as_ref(), &self.settings.segmentation)?;

        let summary = FrameSummary {
            slabs: fitted.steps.len(),
            staircases_appended: fitted.staircases.len(),
        };

        self.visible_steps = fitted.steps;
        for staircase in fitted.staircases {
            self.registry.append(staircase);
        }

        tracing::debug!(
            stamp = ?frame.stamp,
            slabs = summary.slabs,
            staircases = summary.staircases_appended,
            "Consumed sensor frame"
        );
        Ok(summary)
    }
}

impl StairExporter for StairsEngine {
    fn export_stairs(&self) -> Vec<Staircase> {
        self.registry.snapshot().to_vec()
    }
}

impl StairImporter for StairsEngine {
    fn import_stairs(&mut self, staircases: Vec<Staircase>) -> Result<usize> {
        if let Some(idx) = staircases.iter().position(Staircase::is_empty) {
            return Err(Error::MalformedRequest(format!(
                "staircase {} has no steps",
                idx
            )));
        }

        let count = staircases.len();
        self.registry.replace_all(staircases);
        tracing::info!(staircases = count, "Imported stairs");
        Ok(count)
    }
}

impl StairClearer for StairsEngine {
    fn clear_stairs(&mut self) -> Result<()> {
        self.registry.clear();
        tracing::info!("Cleared stairs");
        Ok(())
    }
}
