// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensor frame input.

use crate::error::ApiError;
use crate::types::FrameResponse;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use stairs_processing::{FrameConsumer, SensorFrame};
use std::sync::Arc;
use std::time::Instant;

/// POST /api/v1/topics/:topic - Feed one sensor frame to the engine.
pub async fn post_frame(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    payload: Result<Json<SensorFrame>, JsonRejection>,
) -> Result<Json<FrameResponse>, ApiError> {
    if topic != state.config.engine.input_topic {
        return Err(ApiError::NotFound(format!("No input topic named '{}'", topic)));
    }
    let Json(frame) = payload?;

    let start = Instant::now();
    let engine = Arc::clone(&state.engine);
    let summary = tokio::task::spawn_blocking(move || engine.lock().consume_frame(frame)).await??;
    let processing_time_ms = start.elapsed().as_millis() as u64;

    tracing::debug!(
        topic = %topic,
        slabs = summary.slabs,
        staircases = summary.staircases_appended,
        processing_time_ms,
        "Frame processed"
    );

    Ok(Json(FrameResponse {
        topic,
        summary,
        processing_time_ms,
    }))
}
