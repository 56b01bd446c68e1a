// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Health check endpoint.

use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// Staircases currently registered.
    pub staircases: usize,
}

/// API information response.
#[derive(Debug, Serialize)]
pub struct ApiInfoResponse {
    pub service: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

/// Endpoint information.
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/health - Health check endpoint.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: "stairs-server",
        staircases: state.registry.len(),
    })
}

/// GET / - API information endpoint.
pub async fn info() -> Json<ApiInfoResponse> {
    Json(ApiInfoResponse {
        service: "stairs-server",
        version: env!("CARGO_PKG_VERSION"),
        description: "Staircase registry and wireframe marker server",
        endpoints: vec![
            EndpointInfo {
                method: "GET",
                path: "/api/v1/health",
                description: "Health check endpoint",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/stairs",
                description: "Export every registered staircase",
            },
            EndpointInfo {
                method: "PUT",
                path: "/api/v1/stairs",
                description: "Replace the registry with the given staircases",
            },
            EndpointInfo {
                method: "DELETE",
                path: "/api/v1/stairs",
                description: "Remove every staircase",
            },
            EndpointInfo {
                method: "POST",
                path: "/api/v1/topics/:topic",
                description: "Submit a sensor frame on the input topic",
            },
            EndpointInfo {
                method: "GET",
                path: "/api/v1/markers/:topic",
                description: "Latest marker published on an output topic",
            },
        ],
    })
}
