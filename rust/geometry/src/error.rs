// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building step geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The frame lookup collaborator could not resolve the frame pair.
    /// Recoverable: only the computation that needed it is abandoned.
    #[error("Failed to transform '{target_frame}' -> '{source_frame}': {cause}")]
    FrameLookupFailed {
        target_frame: String,
        source_frame: String,
        #[source]
        cause: LookupError,
    },

    #[error("Frame lookup is not available")]
    TransformUnavailable,

    #[error("Invalid slab: {0}")]
    InvalidSlab(String),
}

/// Failures reported by a [`FrameLookup`](crate::frames::FrameLookup) backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("frame '{0}' does not exist")]
    UnknownFrame(String),

    #[error("frames '{target_frame}' and '{source_frame}' are not connected")]
    Disconnected {
        target_frame: String,
        source_frame: String,
    },

    #[error("registering '{child}' under '{parent}' would create a cycle")]
    Cycle { parent: String, child: String },

    #[error("transform '{parent}' -> '{child}' is invalid: {reason}")]
    InvalidTransform {
        parent: String,
        child: String,
        reason: String,
    },

    #[error("{0}")]
    Backend(String),
}

impl Error {
    /// Whether the failure only affects the current computation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::FrameLookupFailed { .. })
    }
}
