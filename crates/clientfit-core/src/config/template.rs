/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `clientfit init` to create a starter config file that users can
/// immediately edit.
pub fn generate_config() -> String {
    r##"# clientfit configuration
# Location: ~/.config/clientfit/config.toml

[resize]
# Target client (content) area in physical pixels. Title bars, borders
# and drop shadows are added on top of this automatically.
width = 1920
height = 1080
# Place the client area at the top-left corner of the window's monitor.
move_to_origin = false
# Extra attempts when the window manager adjusts the requested size
# (0 to 5). Every attempt measures the window again from scratch.
retries = 1
# Milliseconds to wait after resizing before checking the result. Raise
# this (e.g. 150) for games and apps that resize on a render thread.
settle_ms = 0

[logging]
# Write a log file to ~/.config/clientfit/logs/clientfit.log
enabled = false
# Minimum level: "debug", "info", "warn", or "error". "debug" records
# every measured rectangle for each resize.
level = "info"
# At startup, move a log larger than this many megabytes to clientfit.log.1.
max_file_mb = 10
"##
    .to_string()
}
