use std::time::Duration;

use serde::Serialize;

use clientfit_core::config::Config;
use clientfit_core::{
    BatchEntry, BatchOptions, BatchSummary, Point, ResizeRequest, ResizeResult, WindowHandle,
    log_error, log_info, resize_all,
};

use super::list::print_json;
use super::platform;
use crate::ResizeArgs;

#[derive(Serialize)]
struct EntryReport<'a> {
    handle: WindowHandle,
    title: String,
    attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a ResizeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    windows: Vec<EntryReport<'a>>,
    summary: BatchSummary,
}

/// Resizes every `--hwnd` to the target client size. Exits non-zero unless
/// every window reached it.
pub fn execute(args: &ResizeArgs, config: &Config) -> i32 {
    let (width, height) = args.target.resolve(config);

    let desktop = match platform::desktop(Duration::from_millis(config.resize.settle_ms)) {
        Ok(desktop) => desktop,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    let requests = requests(args, width, height);
    log_info!(
        "resizing {} window(s) to client {width}x{height}",
        requests.len()
    );
    let entries = resize_all(&desktop, &requests, &batch_options(args, config));
    let summary = BatchSummary::of(&entries);

    if args.json {
        let report = Report {
            windows: entries.iter().map(report).collect(),
            summary,
        };
        let code = print_json(&report);
        return if summary.all_succeeded() { code } else { 1 };
    }

    for entry in &entries {
        print_entry(entry, args.verbose);
    }
    if entries.len() > 1 {
        println!(
            "\n{} succeeded, {} partial, {} failed",
            summary.succeeded, summary.partial, summary.failed
        );
    }

    if summary.all_succeeded() { 0 } else { 1 }
}

/// Builds one request per handle. An explicit `--x/--y` is fixed here;
/// monitor origins are resolved per window by the batch driver.
fn requests(args: &ResizeArgs, width: i32, height: i32) -> Vec<ResizeRequest> {
    let explicit = args.x.zip(args.y).map(|(x, y)| Point::new(x, y));
    args.hwnd
        .iter()
        .map(|&handle| {
            let request = ResizeRequest::new(handle, width, height);
            match explicit {
                Some(point) => request.at(point),
                None => request,
            }
        })
        .collect()
}

/// `--origin` or the config's `move_to_origin`. Requests that carry an
/// explicit position keep it.
fn batch_options(args: &ResizeArgs, config: &Config) -> BatchOptions {
    let mut options = config.resize.batch_options();
    options.to_monitor_origin |= args.origin;
    options
}

fn report(entry: &BatchEntry) -> EntryReport<'_> {
    EntryReport {
        handle: entry.handle,
        title: platform::title(entry.handle),
        attempts: entry.attempts,
        result: entry.result.as_ref().ok(),
        error: entry.result.as_ref().err().map(ToString::to_string),
    }
}

fn print_entry(entry: &BatchEntry, verbose: bool) {
    let title = platform::title(entry.handle);
    let result = match &entry.result {
        Ok(result) => result,
        Err(e) => {
            log_error!("resize {}: {e}", entry.handle);
            eprintln!("{} \"{title}\": error: {e}", entry.handle);
            return;
        }
    };

    if verbose {
        println!("{}", result.trace);
    }

    let achieved = result.achieved_size();
    let retried = if entry.attempts > 1 {
        format!(" after {} attempts", entry.attempts)
    } else {
        String::new()
    };
    let position = match result.requested_top_left {
        Some(wanted) => format!(
            " at {} (requested {wanted})",
            result.achieved_client.top_left()
        ),
        None => String::new(),
    };
    if result.is_success() {
        println!(
            "{} \"{title}\": client {achieved}{position}{retried}",
            entry.handle
        );
    } else {
        let delta = result.delta();
        println!(
            "{} \"{title}\": partial, client {achieved} (requested {}, off by {:+}x{:+}){position}{retried}",
            entry.handle, result.requested, delta.width, delta.height
        );
    }
}
