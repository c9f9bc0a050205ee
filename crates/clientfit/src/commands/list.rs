use std::time::Duration;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use clientfit_core::config::Config;
use clientfit_core::{MeasurementError, Size, SizeCheck, SizeStatus, WindowHandle, check, log_warn};

use super::platform::{self, Listed};
use crate::ListArgs;

#[derive(Serialize)]
struct ListEntry<'a> {
    handle: WindowHandle,
    title: &'a str,
    class: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    check: Option<SizeCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Lists candidate windows with their client size against the target.
pub fn execute(args: &ListArgs, config: &Config) -> i32 {
    let (width, height) = args.target.resolve(config);
    let target = Size::new(width, height);

    let (desktop, windows) = match platform::desktop(Duration::ZERO)
        .and_then(|desktop| Ok((desktop, platform::windows()?)))
    {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let checks: Vec<_> = windows
        .iter()
        .map(|w| {
            let result = check(&desktop, w.handle, target);
            if let Err(e) = &result {
                log_warn!("list: {} ({}): {e}", w.handle, w.title);
            }
            (w, result)
        })
        .collect();

    if args.json {
        let entries: Vec<_> = checks
            .iter()
            .map(|(w, result)| ListEntry {
                handle: w.handle,
                title: &w.title,
                class: &w.class,
                check: result.as_ref().ok().copied(),
                error: result.as_ref().err().map(ToString::to_string),
            })
            .collect();
        return print_json(&entries);
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("Class"),
            Cell::new("Client").set_alignment(CellAlignment::Right),
            Cell::new(format!("Status ({target})")),
        ]);

    for (window, result) in &checks {
        table.add_row(row(window, result));
    }

    println!("{table}");
    println!("\n{} windows found", checks.len());
    0
}

fn row(window: &Listed, result: &Result<SizeCheck, MeasurementError>) -> Vec<Cell> {
    let (client, status) = match result {
        Ok(c) if c.status == SizeStatus::AlreadyCorrect => {
            (c.client.to_string(), Cell::new("ok").fg(Color::Green))
        }
        Ok(c) => (
            c.client.to_string(),
            Cell::new("needs resize").fg(Color::Yellow),
        ),
        Err(e) => ("-".to_string(), Cell::new(e.to_string()).fg(Color::Red)),
    };
    vec![
        Cell::new(window.handle),
        Cell::new(&window.title),
        Cell::new(&window.class),
        Cell::new(client).set_alignment(CellAlignment::Right),
        status,
    ]
}

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("Error: could not serialize output: {e}");
            1
        }
    }
}
