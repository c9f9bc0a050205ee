use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::Config;

/// Returns the config directory: `~/.config/clientfit/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("clientfit"))
}

/// Returns the config file path: `~/.config/clientfit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Why `config.toml` could not be used.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not determine config path")]
    NoHome,
    #[error("{}: file not found", path.display())]
    NotFound { path: PathBuf },
    #[error("{}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Tries to load and parse `config.toml`.
///
/// Values are clamped to safe ranges via [`Config::validate`].
pub fn try_load() -> Result<Config, LoadError> {
    let path = config_path().ok_or(LoadError::NoHome)?;
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound { path });
        }
        Err(source) => return Err(LoadError::Io { path, source }),
    };
    let mut config: Config = match toml::from_str(&content) {
        Ok(config) => config,
        Err(source) => return Err(LoadError::Parse { path, source }),
    };
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently returns defaults; other errors are reported
/// on stderr.
pub fn load() -> Config {
    match try_load() {
        Ok(config) => config,
        Err(LoadError::NotFound { .. }) => Config::default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            Config::default()
        }
    }
}
