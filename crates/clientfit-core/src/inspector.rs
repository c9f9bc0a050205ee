//! Geometry Inspector: a consistent snapshot of a window's nested
//! rectangles. Purely observational.

use crate::error::{MeasurementError, QueryError};
use crate::geometry::{Geometry, ScaleFactor};
use crate::handle::WindowHandle;
use crate::provider::{MeasurementProvider, ShowState};
use crate::rect::{Point, Rect};
use crate::{log_debug, log_warn};

/// Measures the outer, visible and client rectangles of a window along with
/// its scale factor.
///
/// Fails with [`MeasurementError::InvalidHandle`] when the window is gone,
/// [`MeasurementError::Unsupported`] when it is not in its normal restored
/// state, and [`MeasurementError::Inconsistent`] when the rectangles do not
/// nest.
pub fn measure<M>(provider: &M, handle: WindowHandle) -> Result<Geometry, MeasurementError>
where
    M: MeasurementProvider + ?Sized,
{
    if !provider.is_window(handle) {
        return Err(MeasurementError::InvalidHandle { handle });
    }

    let fail = |source| query_failure(provider, handle, source);

    let state = provider.show_state(handle).map_err(fail)?;
    if state != ShowState::Normal {
        return Err(MeasurementError::Unsupported { handle, state });
    }

    let outer = provider.window_rect(handle).map_err(fail)?;
    let (visible, composited) = match provider.frame_bounds(handle).map_err(fail)? {
        Some(frame) => (frame, true),
        None => {
            log_debug!("measure {handle}: no extended frame bounds, using outer rect");
            (outer, false)
        }
    };
    let client = client_on_screen(provider, handle).map_err(fail)?;
    let scale = scale_of(provider, handle);

    let geometry = Geometry {
        handle,
        outer,
        visible,
        client,
        scale,
        composited,
    };
    geometry.validate()?;
    Ok(geometry)
}

/// Maps the client-relative client rect to screen coordinates by
/// transforming both corners.
fn client_on_screen<M>(provider: &M, handle: WindowHandle) -> Result<Rect, QueryError>
where
    M: MeasurementProvider + ?Sized,
{
    let local = provider.client_rect(handle)?;
    let top_left = provider.client_to_screen(handle, local.top_left())?;
    let bottom_right = provider.client_to_screen(handle, Point::new(local.right, local.bottom))?;
    Ok(Rect::new(
        top_left.x,
        top_left.y,
        bottom_right.x,
        bottom_right.y,
    ))
}

fn scale_of<M>(provider: &M, handle: WindowHandle) -> ScaleFactor
where
    M: MeasurementProvider + ?Sized,
{
    match provider.dpi(handle) {
        Ok(dpi) => ScaleFactor::from_dpi(dpi).unwrap_or_else(|| {
            log_debug!("measure {handle}: DPI unknown, assuming 100%");
            ScaleFactor::DEFAULT
        }),
        Err(e) => {
            log_warn!("measure {handle}: {e}, assuming 100%");
            ScaleFactor::DEFAULT
        }
    }
}

/// A query failed mid-measurement. If the window vanished in the meantime
/// the handle is reported as invalid rather than as a query failure.
pub(crate) fn query_failure<M>(
    provider: &M,
    handle: WindowHandle,
    source: QueryError,
) -> MeasurementError
where
    M: MeasurementProvider + ?Sized,
{
    if provider.is_window(handle) {
        MeasurementError::Query { handle, source }
    } else {
        MeasurementError::InvalidHandle { handle }
    }
}
