//! The OS seam for the commands. On Windows it hands out the Win32 desktop;
//! elsewhere every entry point reports that Windows is required.

use std::time::Duration;

use clientfit_core::WindowHandle;

#[cfg(not(windows))]
pub use self::unsupported::*;
#[cfg(windows)]
pub use self::win32::*;

/// A window offered to the user.
#[derive(Debug, Clone)]
pub struct Listed {
    pub handle: WindowHandle,
    pub title: String,
    pub class: String,
}

#[cfg(windows)]
mod win32 {
    use super::*;

    use clientfit_windows::{Win32Desktop, Window, dpi};

    /// Switches the process to physical pixels and returns the desktop.
    pub fn desktop(settle: Duration) -> Result<Win32Desktop, String> {
        dpi::enable_dpi_awareness();
        Ok(Win32Desktop::new().with_settle(settle))
    }

    pub fn windows() -> Result<Vec<Listed>, String> {
        let windows = clientfit_windows::app_windows().map_err(|e| e.to_string())?;
        Ok(windows
            .into_iter()
            .map(|w| Listed {
                handle: w.handle(),
                title: w.title(),
                class: w.class(),
            })
            .collect())
    }

    pub fn title(handle: WindowHandle) -> String {
        Window::from_handle(handle).title()
    }
}

#[cfg(not(windows))]
mod unsupported {
    use super::*;

    use clientfit_core::{
        MeasurementProvider, PlacementProvider, Point, QueryError, Rect, ShowState,
    };

    const UNSUPPORTED: &str = "this command requires Windows";

    /// Stands in for the desktop on hosts without one. Never constructed.
    pub enum NoDesktop {}

    impl MeasurementProvider for NoDesktop {
        fn is_window(&self, _: WindowHandle) -> bool {
            match *self {}
        }

        fn show_state(&self, _: WindowHandle) -> Result<ShowState, QueryError> {
            match *self {}
        }

        fn window_rect(&self, _: WindowHandle) -> Result<Rect, QueryError> {
            match *self {}
        }

        fn frame_bounds(&self, _: WindowHandle) -> Result<Option<Rect>, QueryError> {
            match *self {}
        }

        fn client_rect(&self, _: WindowHandle) -> Result<Rect, QueryError> {
            match *self {}
        }

        fn client_to_screen(&self, _: WindowHandle, _: Point) -> Result<Point, QueryError> {
            match *self {}
        }

        fn dpi(&self, _: WindowHandle) -> Result<u32, QueryError> {
            match *self {}
        }

        fn monitor_origin(&self, _: WindowHandle) -> Result<Point, QueryError> {
            match *self {}
        }
    }

    impl PlacementProvider for NoDesktop {
        fn place(&self, _: WindowHandle, _: Rect) -> Result<(), QueryError> {
            match *self {}
        }
    }

    pub fn desktop(_settle: Duration) -> Result<NoDesktop, String> {
        Err(UNSUPPORTED.into())
    }

    pub fn windows() -> Result<Vec<Listed>, String> {
        Err(UNSUPPORTED.into())
    }

    pub fn title(_: WindowHandle) -> String {
        String::new()
    }
}
