// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry persistence on shutdown.

use anyhow::Context;
use parking_lot::Mutex;
use stairs_processing::{save_snapshot, StairExporter, StairsEngine};
use std::path::Path;

/// Export every staircase and write it to `path`.
///
/// Returns the number of staircases written.
pub fn persist_snapshot(engine: &Mutex<StairsEngine>, path: &Path) -> anyhow::Result<usize> {
    let staircases = engine.lock().export_stairs();
    save_snapshot(path, &staircases)
        .with_context(|| format!("Failed to write stairs snapshot {}", path.display()))?;
    tracing::info!(path = %path.display(), staircases = staircases.len(), "Saved stairs snapshot");
    Ok(staircases.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stairs_geometry::RigidTransformer;
    use stairs_processing::{load_snapshot, EngineSettings, NullSink};

    fn sample_engine() -> Mutex<StairsEngine> {
        let settings = EngineSettings {
            use_sample_data: true,
            ..Default::default()
        };
        Mutex::new(StairsEngine::new(settings, RigidTransformer::unavailable(), NullSink))
    }

    #[test]
    fn test_persisted_snapshot_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stairs.json");
        let engine = sample_engine();

        assert_eq!(persist_snapshot(&engine, &path).unwrap(), 3);
        assert_eq!(load_snapshot(&path).unwrap(), engine.lock().export_stairs());
    }

    #[test]
    fn test_unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("stairs.json");

        let err = persist_snapshot(&sample_engine(), &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write stairs snapshot"));
    }
}
