use std::time::Duration;

use clientfit_core::{log_warn, measure};

use super::list::print_json;
use super::platform;
use crate::InspectArgs;

/// Prints the measured geometry of one window.
pub fn execute(args: &InspectArgs) -> i32 {
    let desktop = match platform::desktop(Duration::ZERO) {
        Ok(desktop) => desktop,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let geometry = match measure(&desktop, args.hwnd) {
        Ok(geometry) => geometry,
        Err(e) => {
            log_warn!("inspect {}: {e}", args.hwnd);
            eprintln!("Error: {e}");
            return 1;
        }
    };

    if args.json {
        return print_json(&geometry);
    }

    let title = platform::title(args.hwnd);
    println!("── {} \"{title}\" ──", args.hwnd);
    println!("{geometry}");
    0
}
