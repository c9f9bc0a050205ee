use windows::Win32::Foundation::HWND;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, GetDpiForWindow, SetProcessDpiAwarenessContext,
};

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows virtualizes coordinates for windows on scaled
/// monitors and every rectangle we measure or place would be in logical
/// pixels. With per-monitor awareness all queries and `SetWindowPos` use
/// raw physical pixels, which is what the resize targets are expressed in.
///
/// Must be called once at process startup, before any geometry query.
pub fn enable_dpi_awareness() {
    // SAFETY: SetProcessDpiAwarenessContext is safe to call once at startup.
    // If it fails (e.g. already set via manifest), we ignore the error.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Returns the DPI of the monitor the window is on, or 0 if unknown.
pub fn window_dpi(hwnd: HWND) -> u32 {
    // SAFETY: GetDpiForWindow is a read-only query; it returns 0 for an
    // invalid HWND.
    unsafe { GetDpiForWindow(hwnd) }
}
