// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use serde::Deserialize;
use stairs_geometry::Staircase;

/// Body of an import call. Replaces the whole registry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRequest {
    pub staircases: Vec<Staircase>,
}
