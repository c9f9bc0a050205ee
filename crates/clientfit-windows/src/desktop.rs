use std::thread;
use std::time::Duration;

use clientfit_core::{
    MeasurementProvider, PlacementProvider, Point, QueryError, Rect, ShowState, WindowHandle,
    log_debug,
};
use windows::Win32::UI::WindowsAndMessaging::{
    IsIconic, IsWindow, IsWindowVisible, IsZoomed, SWP_FRAMECHANGED, SWP_NOACTIVATE,
    SWP_NOZORDER, SetWindowPos, WS_CAPTION,
};

use crate::window::Window;
use crate::{dpi, frame, monitor};

/// The live desktop: answers geometry queries and places windows through
/// Win32.
///
/// The process must be per-monitor DPI aware (see
/// [`dpi::enable_dpi_awareness`]) for the rectangles to be physical pixels.
#[derive(Debug, Clone, Default)]
pub struct Win32Desktop {
    settle: Duration,
}

impl Win32Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits `settle` after each placement so apps that resize on another
    /// thread (games, GPU-composited apps) finish before re-measurement.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// A window covering its whole monitor without a caption is treated as
    /// exclusive/borderless fullscreen.
    fn is_fullscreen(window: &Window) -> bool {
        if window.style() & WS_CAPTION.0 == WS_CAPTION.0 {
            return false;
        }
        match (
            frame::window_rect(window.hwnd()),
            monitor::monitor_rect(window.hwnd()),
        ) {
            (Ok(rect), Ok(screen)) => {
                rect.left <= screen.left
                    && rect.top <= screen.top
                    && rect.right >= screen.right
                    && rect.bottom >= screen.bottom
            }
            _ => false,
        }
    }
}

impl MeasurementProvider for Win32Desktop {
    fn is_window(&self, handle: WindowHandle) -> bool {
        let hwnd = Window::from_handle(handle).hwnd();
        // SAFETY: IsWindow accepts any value and only reports validity.
        unsafe { IsWindow(Some(hwnd)).as_bool() }
    }

    fn show_state(&self, handle: WindowHandle) -> Result<ShowState, QueryError> {
        let window = Window::from_handle(handle);
        let hwnd = window.hwnd();

        // SAFETY: simple read-only state queries.
        let (visible, iconic, zoomed) = unsafe {
            (
                IsWindowVisible(hwnd).as_bool(),
                IsIconic(hwnd).as_bool(),
                IsZoomed(hwnd).as_bool(),
            )
        };

        let state = if !visible {
            ShowState::Hidden
        } else if iconic {
            ShowState::Minimized
        } else if zoomed {
            ShowState::Maximized
        } else if Self::is_fullscreen(&window) {
            ShowState::Fullscreen
        } else {
            ShowState::Normal
        };
        Ok(state)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, QueryError> {
        frame::window_rect(Window::from_handle(handle).hwnd())
    }

    fn frame_bounds(&self, handle: WindowHandle) -> Result<Option<Rect>, QueryError> {
        Ok(frame::visible_rect(Window::from_handle(handle).hwnd()))
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, QueryError> {
        frame::client_rect(Window::from_handle(handle).hwnd())
    }

    fn client_to_screen(&self, handle: WindowHandle, point: Point) -> Result<Point, QueryError> {
        frame::client_to_screen(Window::from_handle(handle).hwnd(), point)
    }

    fn dpi(&self, handle: WindowHandle) -> Result<u32, QueryError> {
        Ok(dpi::window_dpi(Window::from_handle(handle).hwnd()))
    }

    fn monitor_origin(&self, handle: WindowHandle) -> Result<Point, QueryError> {
        monitor::monitor_origin(Window::from_handle(handle).hwnd())
    }
}

impl PlacementProvider for Win32Desktop {
    fn place(&self, handle: WindowHandle, outer: Rect) -> Result<(), QueryError> {
        let window = Window::from_handle(handle);

        // No z-order change, no activation. Unlike a tiling layout we let
        // the window see WM_WINDOWPOSCHANGING: if it clamps the size, the
        // re-measurement reports that as a partial result.
        let mut flags = SWP_NOZORDER | SWP_NOACTIVATE;

        // SWP_FRAMECHANGED forces WM_NCCALCSIZE, which GPU-composited apps
        // need to rebuild their surface. Other windows can use it to
        // enforce size constraints, so it is only added where required.
        let frame_changed = window.needs_frame_changed();
        if frame_changed {
            flags |= SWP_FRAMECHANGED;
        }

        log_debug!(
            "place {handle}: ({},{} {}x{}) frame_changed={frame_changed}",
            outer.left,
            outer.top,
            outer.width(),
            outer.height(),
        );

        // SAFETY: SetWindowPos fails cleanly for a stale HWND.
        unsafe {
            SetWindowPos(
                window.hwnd(),
                None,
                outer.left,
                outer.top,
                outer.width(),
                outer.height(),
                flags,
            )
        }
        .map_err(|e| QueryError::new("SetWindowPos", e.to_string()))?;

        if !self.settle.is_zero() {
            thread::sleep(self.settle);
        }
        Ok(())
    }
}
