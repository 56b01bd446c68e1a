// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export, import and clear endpoints for the staircase registry.
//!
//! The engine lock is only ever taken on the blocking pool.

use crate::error::ApiError;
use crate::types::{ImportRequest, ServiceResponse, StairsResponse};
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use stairs_processing::{StairClearer, StairExporter, StairImporter};
use std::sync::Arc;

/// GET /api/v1/stairs - Export the registry.
pub async fn export_stairs(
    State(state): State<AppState>,
) -> Result<Json<StairsResponse>, ApiError> {
    let engine = Arc::clone(&state.engine);
    let staircases = tokio::task::spawn_blocking(move || engine.lock().export_stairs()).await?;
    let step_count = staircases.iter().map(|s| s.len()).sum();
    tracing::debug!(staircases = staircases.len(), step_count, "Exported stairs");
    Ok(Json(StairsResponse {
        staircases,
        step_count,
    }))
}

/// PUT /api/v1/stairs - Replace the registry.
///
/// Malformed bodies leave the registry untouched.
pub async fn import_stairs(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let Json(request) = payload?;
    let engine = Arc::clone(&state.engine);
    let staircases =
        tokio::task::spawn_blocking(move || engine.lock().import_stairs(request.staircases))
            .await??;
    Ok(Json(ServiceResponse {
        success: true,
        staircases,
    }))
}

/// DELETE /api/v1/stairs - Empty the registry.
pub async fn clear_stairs(
    State(state): State<AppState>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let engine = Arc::clone(&state.engine);
    tokio::task::spawn_blocking(move || engine.lock().clear_stairs()).await??;
    Ok(Json(ServiceResponse {
        success: true,
        staircases: 0,
    }))
}
