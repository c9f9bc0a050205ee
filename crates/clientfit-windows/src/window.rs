use clientfit_core::WindowHandle;

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GWL_STYLE, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, RealGetWindowClassW,
};

/// A top-level window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle owned by the OS. This struct only holds the
/// handle and queries the OS lazily; it never keeps the window alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a `Window` from a platform-agnostic handle.
    pub fn from_handle(handle: WindowHandle) -> Self {
        Self {
            hwnd: HWND(handle.raw() as *mut _),
        }
    }

    /// Returns the raw window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Returns the platform-agnostic handle.
    pub fn handle(&self) -> WindowHandle {
        WindowHandle::new(self.hwnd.0 as usize)
    }

    /// Returns the window title, or an empty string if it has none.
    pub fn title(&self) -> String {
        // SAFETY: GetWindowTextLengthW and GetWindowTextW read window text
        // into a buffer we own without modifying window state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    /// Returns the window class name.
    pub fn class(&self) -> String {
        // SAFETY: RealGetWindowClassW reads the window class name.
        // 256 is the maximum class name length in Win32.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..length as usize])
        }
    }

    /// Returns the id of the process that owns the window.
    pub fn process_id(&self) -> u32 {
        let mut pid = 0u32;
        // SAFETY: GetWindowThreadProcessId writes the owner PID into `pid`.
        unsafe { GetWindowThreadProcessId(self.hwnd, Some(&mut pid)) };
        pid
    }

    /// Returns the `GWL_STYLE` bits.
    pub(crate) fn style(&self) -> u32 {
        // SAFETY: GetWindowLongPtrW is a read-only query.
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) as u32 }
    }

    /// Returns the `GWL_EXSTYLE` bits.
    pub(crate) fn ex_style(&self) -> u32 {
        // SAFETY: GetWindowLongPtrW is a read-only query.
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32 }
    }

    /// Returns whether this window needs `SWP_FRAMECHANGED` to update
    /// its rendering surface after a programmatic resize.
    ///
    /// Chromium-based apps (Chrome, Edge, Electron) and Firefox use a GPU
    /// compositor that only repaints when `WM_NCCALCSIZE` fires.
    pub(crate) fn needs_frame_changed(&self) -> bool {
        let class = self.class();
        class == "Chrome_WidgetWin_1" || class == "MozillaWindowClass"
    }
}
