// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Service modules for marker delivery, the publish loop and snapshots.

pub mod marker_board;
pub mod publisher;
pub mod snapshot;

pub use marker_board::MarkerBoard;
pub use publisher::spawn_publisher;
pub use snapshot::persist_snapshot;
