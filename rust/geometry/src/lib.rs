// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Staircase Geometry
//!
//! Turns detected step slabs into line-list wireframes: axis conversion
//! between sensor and display conventions, rigid transforms between named
//! frames, front-face and riser derivation, and marker assembly.

pub mod error;
pub mod frame;
pub mod frames;
pub mod slab;
pub mod step;
pub mod transform;
pub mod wireframe;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Vector3};

pub use error::{Error, LookupError, Result};
pub use frame::{to_display, to_sensor};
pub use frames::{FrameLookup, StaticFrameTree, StaticTransform, TimeQuery};
pub use slab::{Slab, Staircase};
pub use step::{corners_of, outline_edges, riser_edges, wireframe_point_count, Corners};
pub use transform::{Projection, RigidTransformer};
pub use wireframe::{Color, Lifetime, LineList, WireframeAssembler};
