// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Latest marker per output channel.
//!
//! The engine publishes into the board on every tick; HTTP clients poll
//! it. Each publish overwrites the previous marker of its channel, the
//! same way a renderer replaces a marker with a reused id.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use stairs_geometry::LineList;
use stairs_processing::{Channel, MarkerSink};

/// Render sink holding the most recent marker of each channel.
#[derive(Debug, Default)]
pub struct MarkerBoard {
    latest: RwLock<FxHashMap<Channel, LineList>>,
}

impl MarkerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest marker on `channel`, if one was published yet.
    pub fn latest(&self, channel: Channel) -> Option<LineList> {
        self.latest.read().get(&channel).cloned()
    }
}

impl MarkerSink for MarkerBoard {
    fn publish(&self, channel: Channel, marker: LineList) {
        self.latest.write().insert(channel, marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stairs_geometry::{Color, Lifetime, Point3};

    fn marker(points: usize) -> LineList {
        LineList {
            frame_id: "world".into(),
            namespace: "stairs".into(),
            id: 0,
            points: vec![Point3::origin(); points],
            color: Color::STAIRS,
            scale: 0.05,
            lifetime: Lifetime::Forever,
        }
    }

    #[test]
    fn test_publish_overwrites() {
        let board = MarkerBoard::new();
        assert!(board.latest(Channel::Stairs).is_none());

        board.publish(Channel::Stairs, marker(20));
        board.publish(Channel::Stairs, marker(8));

        assert_eq!(board.latest(Channel::Stairs).unwrap().points.len(), 8);
        assert!(board.latest(Channel::Steps).is_none());
    }
}
