// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end scenarios: service calls, publish ticks and frame lookup
//! failures, driven through the capability traits like a host would.

use parking_lot::Mutex;
use stairs_geometry::{
    FrameLookup, Isometry3, LineList, LookupError, Point3, RigidTransformer, Slab, Staircase,
    StaticFrameTree, TimeQuery, Vector3,
};
use stairs_processing::{
    Channel, ChannelOutcome, EngineSettings, FrameConsumer, MarkerSink, SensorFrame,
    StairClearer, StairExporter, StairImporter, StairsEngine,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Keeps every marker it receives.
#[derive(Default)]
struct RecordingSink {
    markers: Mutex<Vec<(Channel, LineList)>>,
}

impl RecordingSink {
    fn on(&self, channel: Channel) -> Vec<LineList> {
        self.markers
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl MarkerSink for RecordingSink {
    fn publish(&self, channel: Channel, marker: LineList) {
        self.markers.lock().push((channel, marker));
    }
}

/// Frame tree whose world <- camera lookup can be switched off.
struct FlakyLookup {
    tree: StaticFrameTree,
    failing: AtomicBool,
}

impl FrameLookup for FlakyLookup {
    fn lookup(
        &self,
        target_frame: &str,
        source_frame: &str,
        at: TimeQuery,
    ) -> Result<Isometry3<f64>, LookupError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::Backend(
                "Lookup would require extrapolation into the past".into(),
            ));
        }
        self.tree.lookup(target_frame, source_frame, at)
    }
}

fn flaky_lookup() -> Arc<FlakyLookup> {
    let mut tree = StaticFrameTree::new();
    tree.insert_translation("world", "base_link", Vector3::new(0.5, 0.0, 0.0)).unwrap();
    tree.insert_translation("base_link", "camera", Vector3::new(0.0, 0.0, 0.75)).unwrap();
    Arc::new(FlakyLookup {
        tree,
        failing: AtomicBool::new(false),
    })
}

fn slab(min: [f64; 3], max: [f64; 3]) -> Slab {
    Slab::new(Point3::from(min), Point3::from(max)).unwrap()
}

fn two_step_staircase() -> Staircase {
    Staircase::from_steps(vec![
        slab([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        slab([0.0, 0.0, 1.0], [1.0, 1.0, 2.0]),
    ])
}

#[test]
fn import_export_publish_round() {
    let sink = Arc::new(RecordingSink::default());
    let lookup = flaky_lookup();
    let mut engine = StairsEngine::new(
        EngineSettings::default(),
        RigidTransformer::new(lookup),
        Arc::clone(&sink),
    );

    let installed = engine.import_stairs(vec![two_step_staircase()]).unwrap();
    assert_eq!(installed, 1);

    let exported = engine.export_stairs();
    assert_eq!(exported, vec![two_step_staircase()]);
    assert_eq!(exported[0].steps[0].min(), Point3::new(0.0, 0.0, 0.0));
    assert_eq!(exported[0].steps[1].min(), Point3::new(0.0, 0.0, 1.0));

    let report = engine.publish_tick();
    assert_eq!(report.stairs, ChannelOutcome::Published { points: 20 });

    let stairs = sink.on(Channel::Stairs);
    assert_eq!(stairs.len(), 1);
    assert_eq!(stairs[0].points.len(), 8 * 2 + 4);
    assert_eq!(stairs[0].frame_id, "world");
    assert_eq!(stairs[0].id, 0);
    // Lower step min corner, display axes, then world <- camera offset
    assert_eq!(stairs[0].points[0], Point3::new(0.5, 0.0, 0.75));
}

#[test]
fn frame_lookup_failure_skips_stairs_channel_only() {
    let sink = Arc::new(RecordingSink::default());
    let lookup = flaky_lookup();
    let mut engine = StairsEngine::new(
        EngineSettings::default(),
        RigidTransformer::new(lookup.clone()),
        Arc::clone(&sink),
    );
    engine.import_stairs(vec![two_step_staircase()]).unwrap();
    engine
        .consume_frame(SensorFrame {
            stamp: Some(1.0),
            clusters: vec![vec![Point3::new(0.0, 0.0, 1.0), Point3::new(0.5, 0.2, 1.2)]],
            staircases: Vec::new(),
        })
        .unwrap();

    lookup.failing.store(true, Ordering::SeqCst);
    let report = engine.publish_tick();

    assert_eq!(report.steps, ChannelOutcome::Published { points: 8 });
    match &report.stairs {
        ChannelOutcome::Skipped { reason } => {
            assert!(reason.contains("'world'"));
            assert!(reason.contains("'camera'"));
        }
        other => panic!("stairs channel should be skipped, got {other:?}"),
    }
    assert!(sink.on(Channel::Stairs).is_empty());
    assert_eq!(sink.on(Channel::Steps).len(), 1);

    // Registry intact, next tick recovers
    assert_eq!(engine.export_stairs(), vec![two_step_staircase()]);
    lookup.failing.store(false, Ordering::SeqCst);
    assert!(engine.publish_tick().stairs.is_published());
    assert_eq!(sink.on(Channel::Stairs).len(), 1);
}

#[test]
fn ingestion_then_services() {
    let sink = Arc::new(RecordingSink::default());
    let mut engine = StairsEngine::new(
        EngineSettings::default(),
        RigidTransformer::new(flaky_lookup()),
        Arc::clone(&sink),
    );

    let frame = SensorFrame {
        stamp: None,
        clusters: vec![
            vec![Point3::new(-0.5, 0.4, 1.0), Point3::new(0.5, 0.5, 1.3)],
            vec![Point3::new(-0.5, 0.2, 1.3), Point3::new(0.5, 0.3, 1.6)],
            vec![Point3::new(-0.5, 0.0, 1.6), Point3::new(0.5, 0.1, 1.9)],
        ],
        staircases: vec![vec![0, 1, 2]],
    };
    engine.consume_frame(frame.clone()).unwrap();
    engine.consume_frame(frame).unwrap();

    assert_eq!(engine.export_stairs().len(), 2);

    let report = engine.publish_tick();
    assert_eq!(report.steps, ChannelOutcome::Published { points: 24 });
    assert_eq!(
        report.stairs,
        ChannelOutcome::Published {
            points: 2 * (8 * 3 + 4 * 2)
        }
    );

    engine.clear_stairs().unwrap();
    engine.clear_stairs().unwrap();
    assert!(engine.export_stairs().is_empty());
    assert_eq!(engine.publish_tick().stairs, ChannelOutcome::Published { points: 0 });
}

#[test]
fn shared_registry_handle_sees_service_writes() {
    let mut engine = StairsEngine::new(
        EngineSettings::default(),
        RigidTransformer::new(flaky_lookup()),
        stairs_processing::NullSink,
    );
    let handle = Arc::clone(engine.registry());

    engine
        .import_stairs(vec![two_step_staircase(), two_step_staircase()])
        .unwrap();
    assert_eq!(handle.snapshot().len(), 2);
    assert_eq!(handle.snapshot().step_count(), 4);

    engine.clear_stairs().unwrap();
    assert!(handle.is_empty());
}
