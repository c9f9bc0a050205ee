use std::fmt;

use serde::Serialize;

use crate::error::QueryError;
use crate::handle::WindowHandle;
use crate::rect::{Point, Rect};

/// How a window is currently shown by the window manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowState {
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
    Hidden,
}

impl fmt::Display for ShowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
            Self::Fullscreen => "fullscreen",
            Self::Hidden => "hidden",
        };
        f.write_str(name)
    }
}

/// Read-only geometry queries against live windows.
///
/// Each platform crate (e.g. `clientfit-windows`) provides its own
/// implementation. All rectangles are in physical pixels.
pub trait MeasurementProvider {
    /// Returns whether the handle still refers to a live window.
    fn is_window(&self, handle: WindowHandle) -> bool;

    /// Returns the window's current show state.
    fn show_state(&self, handle: WindowHandle) -> Result<ShowState, QueryError>;

    /// The window manager's bounding rectangle, drop shadow included.
    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, QueryError>;

    /// The compositor's rendered-frame rectangle, drop shadow excluded.
    ///
    /// Returns `Ok(None)` when composition is disabled or the query is not
    /// supported for this window.
    fn frame_bounds(&self, handle: WindowHandle) -> Result<Option<Rect>, QueryError>;

    /// The client area in client-relative coordinates (origin 0,0).
    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, QueryError>;

    /// Maps a client-relative point to screen coordinates.
    fn client_to_screen(&self, handle: WindowHandle, point: Point) -> Result<Point, QueryError>;

    /// The window's DPI. Zero means unknown.
    fn dpi(&self, handle: WindowHandle) -> Result<u32, QueryError>;

    /// Top-left corner of the monitor nearest to the window.
    fn monitor_origin(&self, handle: WindowHandle) -> Result<Point, QueryError>;
}

/// The single mutating primitive: move and size a window's outer rectangle.
pub trait PlacementProvider {
    /// Places the window's outer rectangle without changing z-order and
    /// without activating it.
    fn place(&self, handle: WindowHandle, outer: Rect) -> Result<(), QueryError>;
}

/// Everything the resize engine needs from the operating environment.
pub trait Desktop: MeasurementProvider + PlacementProvider {}

impl<T: MeasurementProvider + PlacementProvider + ?Sized> Desktop for T {}
