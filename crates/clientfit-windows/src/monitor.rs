use std::mem;

use clientfit_core::{Point, QueryError, Rect};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow,
};

use crate::frame::to_rect;

/// Returns the full bounds of the monitor nearest to the window.
///
/// Unlike the work area this includes the taskbar, which is what a
/// fullscreen window covers.
pub fn monitor_rect(hwnd: HWND) -> Result<Rect, QueryError> {
    Ok(to_rect(monitor_info(hwnd)?.rcMonitor))
}

/// Top-left corner of the monitor containing the window, in physical
/// pixels. Used to place a client area at the display origin.
pub fn monitor_origin(hwnd: HWND) -> Result<Point, QueryError> {
    Ok(monitor_rect(hwnd)?.top_left())
}

fn monitor_info(hwnd: HWND) -> Result<MONITORINFO, QueryError> {
    // SAFETY: MonitorFromWindow with MONITOR_DEFAULTTONEAREST always
    // returns a monitor handle, even for an off-screen window.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct with
    // monitor dimensions. We set cbSize as required by the API.
    let success = unsafe { GetMonitorInfoW(monitor, &mut info) };
    if !success.as_bool() {
        return Err(QueryError::new("GetMonitorInfoW", "failed to get monitor info"));
    }

    Ok(info)
}
