//! Win32 backing for the clientfit measurement and placement providers.
//!
//! Everything here is Windows-only; on other targets the crate is empty.
#![cfg(windows)]

/// Live measurement and placement provider.
pub mod desktop;

/// Per-monitor DPI awareness and per-window DPI.
pub mod dpi;

/// Top-level window enumeration for the picker.
pub mod enumerate;

/// Window, frame and client rectangle queries.
pub mod frame;

/// Monitor geometry.
pub mod monitor;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use desktop::Win32Desktop;
pub use enumerate::app_windows;
pub use window::Window;
