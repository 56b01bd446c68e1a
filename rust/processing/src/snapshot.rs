// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshot files of the staircase registry.
//!
//! Lets a host pre-load staircases at startup and persist exports, since
//! the registry itself lives only as long as the process.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use stairs_geometry::Staircase;
use std::fs;
use std::path::Path;

/// On-disk registry contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StairsSnapshot {
    pub staircases: Vec<Staircase>,
}

/// Read a snapshot file. Slab bounds are validated while parsing.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<Staircase>> {
    let data = fs::read(path.as_ref())?;
    let snapshot: StairsSnapshot = serde_json::from_slice(&data)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        staircases = snapshot.staircases.len(),
        "Loaded stairs snapshot"
    );
    Ok(snapshot.staircases)
}

/// Write a snapshot file, replacing any existing one.
pub fn save_snapshot(path: impl AsRef<Path>, staircases: &[Staircase]) -> Result<()> {
    let snapshot = StairsSnapshot {
        staircases: staircases.to_vec(),
    };
    let data = serde_json::to_vec_pretty(&snapshot)?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}
