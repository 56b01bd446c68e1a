// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synthetic staircases for smoke testing.

use stairs_geometry::{Point3, Slab, Staircase};

/// Three staircases of three nested slabs each, scaled by the staircase
/// index. The first one collapses to the origin.
pub fn sample_staircases() -> Vec<Staircase> {
    (0..3)
        .map(|i| {
            let k = i as f64;
            [(0.0, 0.5), (0.1, 0.4), (0.2, 0.3)]
                .iter()
                .filter_map(|&(lo, hi)| {
                    Slab::new(
                        Point3::new((1.0 + lo) * k, (2.0 + lo) * k, (3.0 + lo) * k),
                        Point3::new((1.0 + hi) * k, (2.0 + hi) * k, (3.0 + hi) * k),
                    )
                    .ok()
                })
                .collect::<Staircase>()
        })
        .collect()
}
