// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the processing pipeline.

use thiserror::Error;

/// Result type alias for processing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine and its service operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] stairs_geometry::Error),

    /// A service request or sensor frame that cannot be applied.
    /// The registry is left unchanged.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}
