pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod inspector;
pub mod log;
pub mod provider;
pub mod rect;

#[cfg(test)]
mod fake;

pub use batch::{BatchEntry, BatchOptions, BatchSummary, resize_all};
pub use engine::{
    MAX_TARGET_PX, Outcome, ResizeRequest, ResizeResult, SizeCheck, SizeStatus, TOLERANCE_PX,
    Trace, check, resize,
};
pub use error::{MeasurementError, QueryError, ResizeError};
pub use geometry::{FrameMargins, Geometry, ScaleFactor};
pub use handle::WindowHandle;
pub use inspector::measure;
pub use provider::{Desktop, MeasurementProvider, PlacementProvider, ShowState};
pub use rect::{Insets, Point, Rect, Size};
