// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Periodic publish loop.

use parking_lot::Mutex;
use stairs_processing::{PublishReport, StairsEngine};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the publish loop on the runtime.
///
/// Each tick locks the engine on the blocking pool, so ticks never
/// interleave with service calls.
pub fn spawn_publisher(engine: Arc<Mutex<StairsEngine>>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks: u64 = 0;

        loop {
            interval.tick().await;
            ticks += 1;

            let engine = Arc::clone(&engine);
            match tokio::task::spawn_blocking(move || engine.lock().publish_tick()).await {
                Ok(report) => log_report(ticks, &report),
                Err(err) => tracing::error!(tick = ticks, error = %err, "Publish tick panicked"),
            }
        }
    })
}

fn log_report(tick: u64, report: &PublishReport) {
    tracing::trace!(tick, steps = ?report.steps, stairs = ?report.stairs, "Publish tick");
}
