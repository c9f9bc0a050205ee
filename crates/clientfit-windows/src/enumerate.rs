use std::mem;

use clientfit_core::QueryError;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::Graphics::Dwm::{DWMWA_CLOAKED, DwmGetWindowAttribute};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, IsWindowVisible, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW,
};
use windows::core::BOOL;

use crate::window::Window;

/// Shell and desktop window classes that are never useful resize targets.
const SHELL_CLASSES: &[&str] = &[
    "Progman",                    // desktop ("Program Manager")
    "WorkerW",                    // desktop wallpaper worker
    "Shell_TrayWnd",              // taskbar
    "Shell_SecondaryTrayWnd",     // secondary-monitor taskbar
    "DV2ControlHost",             // start menu host
    "Windows.UI.Core.CoreWindow", // UWP shell chrome
];

/// Enumerates the windows a user would expect in a task switcher, sorted
/// by title (case-insensitive).
///
/// Skips invisible, untitled, cloaked and shell windows, tool windows that
/// did not opt back in with `WS_EX_APPWINDOW`, and this process's own
/// windows. Minimized windows are listed; resizing them reports that they
/// must be restored first.
pub fn app_windows() -> Result<Vec<Window>, QueryError> {
    let mut windows: Vec<Window> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<Window> to collect results. This is safe
    // because EnumWindows runs synchronously and the Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut windows as *mut _ as isize),
        )
    }
    .map_err(|e| QueryError::new("EnumWindows", e.to_string()))?;

    windows.sort_by_cached_key(|w| w.title().to_lowercase());
    Ok(windows)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec<Window>, cast from app_windows().
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<Window>) };

    if should_include_window(hwnd) {
        windows.push(Window::new(hwnd));
    }

    BOOL(1) // TRUE, continue enumerating
}

fn should_include_window(hwnd: HWND) -> bool {
    // SAFETY: IsWindowVisible is a read-only query.
    if !unsafe { IsWindowVisible(hwnd) }.as_bool() {
        return false;
    }

    let window = Window::new(hwnd);
    if window.title().trim().is_empty() {
        return false;
    }
    // SAFETY: GetCurrentProcessId has no preconditions.
    if window.process_id() == unsafe { GetCurrentProcessId() } {
        return false;
    }
    if SHELL_CLASSES.contains(&window.class().as_str()) {
        return false;
    }

    let ex_style = window.ex_style();
    let is_tool = ex_style & WS_EX_TOOLWINDOW.0 != 0;
    let is_app = ex_style & WS_EX_APPWINDOW.0 != 0;
    if is_tool && !is_app {
        return false;
    }

    !is_cloaked(hwnd)
}

/// Cloaked windows (UWP apps on other virtual desktops, suspended apps)
/// report as visible but are not shown.
fn is_cloaked(hwnd: HWND) -> bool {
    let mut cloaked = 0u32;
    // SAFETY: the out-pointer and size describe a u32 we own.
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut u32 as *mut _,
            mem::size_of::<u32>() as u32,
        )
    };
    result.is_ok() && cloaked != 0
}
