// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Latest published markers.

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use stairs_geometry::LineList;
use stairs_processing::Channel;

/// GET /api/v1/markers/:topic - Latest marker on an output topic.
pub async fn get_marker(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<LineList>, ApiError> {
    let channels = &state.config.engine.channels;
    let channel = if topic == channels.steps_topic {
        Channel::Steps
    } else if topic == channels.stairs_topic {
        Channel::Stairs
    } else {
        return Err(ApiError::NotFound(format!("No output topic named '{}'", topic)));
    };

    state
        .board
        .latest(channel)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Nothing published on '{}' yet", topic)))
}
