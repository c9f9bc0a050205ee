use thiserror::Error;

use crate::handle::WindowHandle;
use crate::provider::ShowState;
use crate::rect::{Edge, Rect};

/// A single OS query or placement primitive failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{query} failed: {message}")]
pub struct QueryError {
    /// Name of the primitive that failed (e.g. `GetWindowRect`).
    pub query: &'static str,
    pub message: String,
}

impl QueryError {
    pub fn new(query: &'static str, message: impl Into<String>) -> Self {
        Self {
            query,
            message: message.into(),
        }
    }
}

/// Which nested layer of the frame violated the containment invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Compositor drop shadow: outer rect down to the visible frame.
    Shadow,
    /// Title bar and borders: visible frame down to the client area.
    Frame,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shadow => f.write_str("shadow margin"),
            Self::Frame => f.write_str("non-client frame"),
        }
    }
}

/// Reasons the Geometry Inspector could not produce a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasurementError {
    #[error("window {handle} no longer exists")]
    InvalidHandle { handle: WindowHandle },

    #[error("window {handle} is {state}; restore it first")]
    Unsupported {
        handle: WindowHandle,
        state: ShowState,
    },

    #[error("window {handle} has a negative {layer} on the {edge} edge ({delta}px)")]
    Inconsistent {
        handle: WindowHandle,
        layer: Layer,
        edge: Edge,
        delta: i32,
    },

    #[error("window {handle}: {source}")]
    Query {
        handle: WindowHandle,
        source: QueryError,
    },
}

/// Reasons a resize could not reach a terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// Non-positive or oversized target, or an outer rectangle that would
    /// not fit in screen coordinates.
    #[error("target client size {width}x{height} is out of range")]
    InvalidTarget { width: i32, height: i32 },

    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error("placement failed for window {handle}: {source}")]
    Placement {
        handle: WindowHandle,
        source: QueryError,
    },

    /// The placement call went through but the window could not be measured
    /// afterwards, e.g. the OS maximized it on the way.
    #[error("window {handle} was placed at {placed} but could not be re-measured: {source}")]
    Verification {
        handle: WindowHandle,
        placed: Rect,
        source: MeasurementError,
    },
}

impl ResizeError {
    /// Whether the error means the window is gone.
    pub fn is_invalid_handle(&self) -> bool {
        matches!(
            self,
            Self::Measurement(MeasurementError::InvalidHandle { .. })
                | Self::Verification {
                    source: MeasurementError::InvalidHandle { .. },
                    ..
                }
        )
    }
}
