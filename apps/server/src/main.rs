// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stairs Server - host process for the staircase geometry engine.
//!
//! Owns the engine, feeds it sensor frames received over HTTP, runs the
//! periodic publish tick and exposes the stairs services.
//!
//! # Endpoints
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/stairs` - Export every staircase
//! - `PUT /api/v1/stairs` - Import staircases, replacing the registry
//! - `DELETE /api/v1/stairs` - Clear the registry
//! - `POST /api/v1/topics/:topic` - Sensor frame on the input topic
//! - `GET /api/v1/markers/:topic` - Latest marker on an output topic

use anyhow::Context;
use parking_lot::Mutex;
use stairs_geometry::RigidTransformer;
use stairs_processing::{load_snapshot, StairImporter, StaircaseRegistry, StairsEngine};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod services;
mod types;

use config::Config;
use services::MarkerBoard;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Serialized access to the engine.
    pub engine: Arc<Mutex<StairsEngine>>,
    /// Read-only registry handle, usable without the engine lock.
    pub registry: Arc<StaircaseRegistry>,
    pub board: Arc<MarkerBoard>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,stairs_server=debug")),
        )
        .pretty()
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        port = config.port,
        input_topic = %config.engine.input_topic,
        camera_frame = %config.engine.frames.camera,
        world_frame = %config.engine.frames.world,
        publish_interval_ms = config.publish_interval_ms,
        use_sample_data = config.engine.use_sample_data,
        "Starting Stairs Server"
    );

    let tree = config
        .build_frame_tree()
        .context("Invalid static frame tree")?;
    tracing::info!(edges = tree.len(), "Frame tree ready");

    let board = Arc::new(MarkerBoard::new());
    let mut engine = StairsEngine::new(
        config.engine.clone(),
        RigidTransformer::new(Arc::new(tree)),
        Arc::clone(&board),
    );
    engine
        .check_transforms()
        .context("Staircase publishing needs a frame lookup")?;

    if let Some(path) = &config.snapshot_path {
        let staircases = load_snapshot(path)
            .with_context(|| format!("Failed to load stairs snapshot {}", path.display()))?;
        let count = engine.import_stairs(staircases)?;
        tracing::info!(path = %path.display(), staircases = count, "Imported stairs snapshot");
    }

    let state = AppState {
        registry: Arc::clone(engine.registry()),
        engine: Arc::new(Mutex::new(engine)),
        board,
        config: Arc::new(config.clone()),
    };

    let publisher = services::spawn_publisher(
        Arc::clone(&state.engine),
        Duration::from_millis(config.publish_interval_ms),
    );

    let state_engine = Arc::clone(&state.engine);
    let app = routes::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    publisher.abort();

    if let Some(path) = &config.snapshot_out {
        services::persist_snapshot(&state_engine, path)?;
    }

    tracing::info!("Stairs Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
