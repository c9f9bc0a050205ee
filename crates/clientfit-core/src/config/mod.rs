mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::batch::BatchOptions;
use crate::engine::MAX_TARGET_PX;
use crate::log::LogConfig;

pub use loader::{LoadError, config_dir, config_path, load, try_load};

/// Upper bound on caller-side retries after a partial success.
const MAX_RETRIES: u32 = 5;
/// Upper bound on the post-placement settle delay.
const MAX_SETTLE_MS: u64 = 2_000;

/// Top-level configuration for clientfit.
///
/// Loaded from `~/.config/clientfit/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default resize target and batch policy.
    pub resize: ResizeConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Resize defaults used when the command line does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Target client width in physical pixels.
    pub width: i32,
    /// Target client height in physical pixels.
    pub height: i32,
    /// Place the client area at the top-left of the window's monitor.
    pub move_to_origin: bool,
    /// Extra attempts for windows that end in partial success.
    pub retries: u32,
    /// Milliseconds to wait after placement before re-measuring, for apps
    /// that apply size changes asynchronously.
    pub settle_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            move_to_origin: false,
            retries: 1,
            settle_ms: 0,
        }
    }
}

impl ResizeConfig {
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            retries: self.retries,
            to_monitor_origin: self.move_to_origin,
        }
    }
}

impl Config {
    /// Clamps target and retry values to safe ranges.
    pub fn validate(&mut self) {
        self.resize.width = self.resize.width.clamp(1, MAX_TARGET_PX);
        self.resize.height = self.resize.height.clamp(1, MAX_TARGET_PX);
        self.resize.retries = self.resize.retries.min(MAX_RETRIES);
        self.resize.settle_ms = self.resize.settle_ms.min(MAX_SETTLE_MS);
    }
}
