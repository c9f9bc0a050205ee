//! Append-only file log.
//!
//! Each invocation appends to `~/.config/clientfit/logs/clientfit.log`. A
//! file that has grown past `max_file_mb` is moved aside to `clientfit.log.1`
//! when the log is opened, so a single run never rotates mid-way. Nothing is
//! written until [`init`] runs with logging enabled, so library callers and
//! tests stay silent.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

static SINK: OnceLock<Sink> = OnceLock::new();

const LOG_FILE_NAME: &str = "clientfit.log";

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Size in megabytes past which the previous log is moved aside.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Unknown names fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.pad(name)
    }
}

struct Sink {
    min_level: Level,
    file: Mutex<File>,
}

/// Where the log file lives, if a home directory is known.
pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|dir| dir.join("logs").join(LOG_FILE_NAME))
}

/// Opens the log for this run. Call once at startup.
///
/// Does nothing if `config.enabled` is `false` or the file cannot be opened.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    rotate_if_oversized(&path, config.max_file_mb.saturating_mul(1024 * 1024));

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = SINK.set(Sink {
        min_level: Level::parse(&config.level),
        file: Mutex::new(file),
    });
}

/// Writes one line if the log is open and `level` passes the filter.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(sink) = SINK.get() else {
        return;
    };
    if level < sink.min_level {
        return;
    }
    if let Ok(mut file) = sink.file.lock() {
        let _ = file.write_all(line(unix_seconds(), level, args).as_bytes());
    }
}

/// `HH:MM:SS LEVEL pid=N message`, UTC time of day.
fn line(secs: u64, level: Level, args: fmt::Arguments<'_>) -> String {
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!(
        "{h:02}:{m:02}:{s:02} {level:<5} pid={} {args}\n",
        std::process::id()
    )
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Moves `path` to its `.1` backup when it is at least `max_bytes` long.
/// A limit of zero disables rotation.
fn rotate_if_oversized(path: &Path, max_bytes: u64) -> bool {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if max_bytes == 0 || size < max_bytes {
        return false;
    }
    fs::rename(path, backup_path(path)).is_ok()
}

/// `clientfit.log` -> `clientfit.log.1`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".1");
    path.with_file_name(name)
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("clientfit-log-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir.join(LOG_FILE_NAME)
    }

    #[test]
    fn level_parse_is_case_insensitive_with_info_fallback() {
        assert_eq!(Level::parse("DEBUG"), Level::Debug);
        assert_eq!(Level::parse(" warn "), Level::Warn);
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn line_has_time_padded_level_and_message() {
        // 01:02:03 UTC on some day.
        let secs = 86_400 * 20_000 + 3_723;

        let text = line(secs, Level::Info, format_args!("resize 0x1F0A2: client 1920x1080"));

        assert!(text.starts_with("01:02:03 INFO  pid="));
        assert!(text.ends_with("resize 0x1F0A2: client 1920x1080\n"));
    }

    #[test]
    fn oversized_log_is_moved_aside() {
        // Arrange
        let path = scratch("oversized");
        fs::write(&path, vec![b'x'; 64]).unwrap();

        // Act
        let rotated = rotate_if_oversized(&path, 32);

        // Assert
        assert!(rotated);
        assert!(!path.exists());
        assert_eq!(fs::read(backup_path(&path)).unwrap().len(), 64);
    }

    #[test]
    fn small_log_and_zero_limit_are_kept() {
        let path = scratch("small");
        fs::write(&path, b"one line\n").unwrap();

        assert!(!rotate_if_oversized(&path, 1024));
        assert!(!rotate_if_oversized(&path, 0));
        assert!(path.exists());
    }

    #[test]
    fn backup_appends_suffix_to_full_name() {
        let path = Path::new("logs").join("clientfit.log");

        assert_eq!(backup_path(&path), Path::new("logs").join("clientfit.log.1"));
    }
}
