// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide staircase collection.
//!
//! The collection lives behind one lock and is swapped as a whole `Arc`, so
//! a [`RegistrySnapshot`] is always a single consistent state. Readers never
//! see a half-applied `replace_all`, `append` or `clear`.

use parking_lot::RwLock;
use stairs_geometry::Staircase;
use std::ops::Deref;
use std::sync::Arc;

/// Detected staircases, in insertion order.
#[derive(Debug, Default)]
pub struct StaircaseRegistry {
    stairs: RwLock<Arc<Vec<Staircase>>>,
}

/// Immutable view of the registry at one instant.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot(Arc<Vec<Staircase>>);

impl StaircaseRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `staircases`.
    pub fn with_staircases(staircases: Vec<Staircase>) -> Self {
        Self {
            stairs: RwLock::new(Arc::new(staircases)),
        }
    }

    /// Discard the current collection and install `staircases`.
    pub fn replace_all(&self, staircases: Vec<Staircase>) {
        *self.stairs.write() = Arc::new(staircases);
    }

    /// Current collection.
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot(Arc::clone(&*self.stairs.read()))
    }

    /// Empty the collection.
    pub fn clear(&self) {
        *self.stairs.write() = Arc::new(Vec::new());
    }

    /// Add one newly detected staircase on the end.
    pub fn append(&self, staircase: Staircase) {
        let mut guard = self.stairs.write();
        Arc::make_mut(&mut *guard).push(staircase);
    }

    /// Number of staircases.
    pub fn len(&self) -> usize {
        self.stairs.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.stairs.read().is_empty()
    }
}

impl RegistrySnapshot {
    /// Copy the staircases out.
    pub fn to_vec(&self) -> Vec<Staircase> {
        (*self.0).clone()
    }

    /// Total number of steps across all staircases.
    pub fn step_count(&self) -> usize {
        self.0.iter().map(Staircase::len).sum()
    }
}

impl Deref for RegistrySnapshot {
    type Target = [Staircase];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}
