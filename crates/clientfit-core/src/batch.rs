//! Caller-side driver for resizing several windows in one go.
//!
//! Every request is attempted independently and produces exactly one entry.
//! Errors never abort the batch.

use serde::Serialize;

use crate::engine::{self, ResizeRequest, ResizeResult};
use crate::error::ResizeError;
use crate::handle::WindowHandle;
use crate::inspector;
use crate::provider::Desktop;
use crate::{log_info, log_warn};

/// Batch-level policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Extra attempts for a window that ended in partial success. Each
    /// attempt re-measures from scratch. Errors are never retried.
    pub retries: u32,
    /// Put the client area of every request without an explicit top-left at
    /// the origin of the window's own monitor.
    pub to_monitor_origin: bool,
}

/// The result for one window of a batch.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub handle: WindowHandle,
    /// How many resize calls were made for this window. Zero when the
    /// request failed before the engine ran.
    pub attempts: u32,
    pub result: Result<ResizeResult, ResizeError>,
}

/// Counts of each terminal state in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub partial: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn of(entries: &[BatchEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            match &entry.result {
                Ok(r) if r.is_success() => acc.succeeded += 1,
                Ok(_) => acc.partial += 1,
                Err(_) => acc.failed += 1,
            }
            acc
        })
    }

    /// True when every window reached its target.
    pub fn all_succeeded(&self) -> bool {
        self.partial == 0 && self.failed == 0
    }
}

/// Resizes each requested window in order.
pub fn resize_all<D>(
    desktop: &D,
    requests: &[ResizeRequest],
    options: &BatchOptions,
) -> Vec<BatchEntry>
where
    D: Desktop + ?Sized,
{
    requests
        .iter()
        .map(|request| resize_one(desktop, request, options))
        .collect()
}

fn resize_one<D>(desktop: &D, request: &ResizeRequest, options: &BatchOptions) -> BatchEntry
where
    D: Desktop + ?Sized,
{
    let request = match anchored(desktop, request, options) {
        Ok(request) => request,
        Err(e) => {
            log_warn!("batch {}: {e}", request.handle);
            return BatchEntry {
                handle: request.handle,
                attempts: 0,
                result: Err(e),
            };
        }
    };
    let request = &request;

    let mut attempts = 1;
    let mut result = engine::resize(desktop, request);

    while attempts <= options.retries && matches!(&result, Ok(r) if !r.is_success()) {
        log_info!(
            "batch {}: retrying partial resize ({attempts}/{})",
            request.handle,
            options.retries
        );
        attempts += 1;
        result = engine::resize(desktop, request);
    }

    BatchEntry {
        handle: request.handle,
        attempts,
        result,
    }
}

/// Resolves the monitor origin for a request that asked for it.
fn anchored<D>(
    desktop: &D,
    request: &ResizeRequest,
    options: &BatchOptions,
) -> Result<ResizeRequest, ResizeError>
where
    D: Desktop + ?Sized,
{
    if !options.to_monitor_origin || request.top_left.is_some() {
        return Ok(*request);
    }
    let origin = desktop
        .monitor_origin(request.handle)
        .map_err(|source| inspector::query_failure(desktop, request.handle, source))?;
    Ok(request.at(origin))
}
