mod commands;

use clap::{Args, Parser, Subcommand};

use clientfit_core::config::{self, Config};
use clientfit_core::{WindowHandle, log};

/// Largest client dimension accepted on the command line.
const MAX_DIMENSION: i64 = clientfit_core::MAX_TARGET_PX as i64;

#[derive(Parser)]
#[command(
    name = "clientfit",
    version,
    about = "Resize any window so its client area is an exact pixel size"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// List resizable windows and whether they already have the target size
    List(ListArgs),
    /// Show the outer, visible and client rectangles of a window
    Inspect(InspectArgs),
    /// Resize one or more windows to an exact client size
    Resize(ResizeArgs),
}

/// Client size override. Falls back to the config file's `[resize]` values.
#[derive(Args, Debug, Clone, Copy)]
pub struct TargetArgs {
    /// Target client width in physical pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=MAX_DIMENSION))]
    pub width: Option<i32>,
    /// Target client height in physical pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=MAX_DIMENSION))]
    pub height: Option<i32>,
}

impl TargetArgs {
    pub fn resolve(&self, config: &Config) -> (i32, i32) {
        (
            self.width.unwrap_or(config.resize.width),
            self.height.unwrap_or(config.resize.height),
        )
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Window handle, decimal or 0x-prefixed hex
    #[arg(long)]
    pub hwnd: WindowHandle,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Window handle, decimal or 0x-prefixed hex. Repeat for several windows.
    #[arg(long, required = true)]
    pub hwnd: Vec<WindowHandle>,
    #[command(flatten)]
    pub target: TargetArgs,
    /// Screen X of the client area's top-left corner
    #[arg(long, requires = "y", conflicts_with = "origin", allow_hyphen_values = true)]
    pub x: Option<i32>,
    /// Screen Y of the client area's top-left corner
    #[arg(long, requires = "x", conflicts_with = "origin", allow_hyphen_values = true)]
    pub y: Option<i32>,
    /// Put the client area at the top-left of the window's monitor
    #[arg(long)]
    pub origin: bool,
    /// Print every measured and computed rectangle
    #[arg(long, short)]
    pub verbose: bool,
    /// Print JSON instead of text
    #[arg(long, conflicts_with = "verbose")]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        commands::init::execute();
        return;
    }

    let config = config::load();
    log::init(&config.logging);

    let code = match cli.command {
        Commands::Init => 0,
        Commands::List(args) => commands::list::execute(&args, &config),
        Commands::Inspect(args) => commands::inspect::execute(&args),
        Commands::Resize(args) => commands::resize::execute(&args, &config),
    };
    std::process::exit(code);
}
