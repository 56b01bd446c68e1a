// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP routes.

pub mod health;
pub mod markers;
pub mod stairs;
pub mod topics;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Root endpoint - API information
        .route("/", get(health::info))
        // Health check
        .route("/api/v1/health", get(health::check))
        // Stairs services
        .route(
            "/api/v1/stairs",
            get(stairs::export_stairs)
                .put(stairs::import_stairs)
                .delete(stairs::clear_stairs),
        )
        // Input and output topics
        .route("/api/v1/topics/:topic", post(topics::post_frame))
        .route("/api/v1/markers/:topic", get(markers::get_marker))
        // Middleware
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
