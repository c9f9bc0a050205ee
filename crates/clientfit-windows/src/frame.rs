use std::mem;

use clientfit_core::{Point, QueryError, Rect};
use windows::Win32::Foundation::{HWND, POINT, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::WindowsAndMessaging::{GetClientRect, GetWindowRect};

pub(crate) fn to_rect(rc: RECT) -> Rect {
    Rect::new(rc.left, rc.top, rc.right, rc.bottom)
}

/// Returns the window's bounding rectangle, invisible drop shadow included.
///
/// On Windows 10/11 this is typically ~7px wider than what is drawn on the
/// left, right and bottom edges.
pub fn window_rect(hwnd: HWND) -> Result<Rect, QueryError> {
    let mut rc = RECT::default();
    // SAFETY: GetWindowRect writes into a caller-owned RECT.
    unsafe { GetWindowRect(hwnd, &mut rc) }
        .map_err(|e| QueryError::new("GetWindowRect", e.to_string()))?;
    Ok(to_rect(rc))
}

/// Returns the visible bounds of a window using DWM extended frame bounds.
///
/// Returns `None` when DWM cannot answer (composition disabled, or a
/// window type DWM does not track). Callers fall back to [`window_rect`].
pub fn visible_rect(hwnd: HWND) -> Option<Rect> {
    let mut frame = RECT::default();
    // SAFETY: the out-pointer and size describe a RECT we own.
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            &mut frame as *mut RECT as *mut _,
            mem::size_of::<RECT>() as u32,
        )
    };

    result.ok().map(|()| to_rect(frame))
}

/// Returns the client area in client coordinates: origin (0,0), extent
/// equal to the client width and height.
pub fn client_rect(hwnd: HWND) -> Result<Rect, QueryError> {
    let mut rc = RECT::default();
    // SAFETY: GetClientRect writes into a caller-owned RECT.
    unsafe { GetClientRect(hwnd, &mut rc) }
        .map_err(|e| QueryError::new("GetClientRect", e.to_string()))?;
    Ok(to_rect(rc))
}

/// Converts a client-relative point to screen coordinates.
pub fn client_to_screen(hwnd: HWND, point: Point) -> Result<Point, QueryError> {
    let mut pt = POINT {
        x: point.x,
        y: point.y,
    };
    // SAFETY: ClientToScreen converts a caller-owned POINT in place.
    let ok = unsafe { ClientToScreen(hwnd, &mut pt) };
    if !ok.as_bool() {
        return Err(QueryError::new("ClientToScreen", "window is not valid"));
    }
    Ok(Point::new(pt.x, pt.y))
}
