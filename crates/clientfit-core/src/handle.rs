use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Opaque identifier of a top-level window, owned by the operating system.
///
/// Holding a handle does not keep the window alive. It may go stale at any
/// moment, so every operation that consumes one must be ready to find the
/// window gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WindowHandle(usize);

impl WindowHandle {
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw pointer-sized value.
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Error returned when a window handle string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseHandleError {
    #[error("invalid window handle {0:?}: expected decimal or 0x-prefixed hex")]
    Malformed(String),
    #[error("window handle must not be zero")]
    Null,
}

impl FromStr for WindowHandle {
    type Err = ParseHandleError;

    /// Parses decimal (`263456`) or hex (`0x40520`) handles.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            usize::from_str_radix(hex, 16)
        } else {
            s.parse()
        };

        match parsed {
            Ok(0) => Err(ParseHandleError::Null),
            Ok(raw) => Ok(Self(raw)),
            Err(_) => Err(ParseHandleError::Malformed(s.to_string())),
        }
    }
}
