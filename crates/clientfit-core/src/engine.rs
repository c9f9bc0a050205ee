//! Resize Engine: lands a window's client area on an exact pixel size with a
//! single placement call.
//!
//! Each call runs Measure, Compute, Apply, Verify and keeps no state between
//! calls. Margins are measured fresh every time since decorations can change
//! between calls (theme switches, DPI moves).

use std::fmt;

use serde::Serialize;

use crate::error::{MeasurementError, ResizeError};
use crate::geometry::{FrameMargins, Geometry};
use crate::handle::WindowHandle;
use crate::inspector;
use crate::provider::{Desktop, MeasurementProvider};
use crate::rect::{Insets, Point, Rect, Size};
use crate::{log_debug, log_info, log_warn};

/// Maximum per-dimension drift, in physical pixels, still counted as
/// success. Window managers round and snap.
pub const TOLERANCE_PX: i32 = 1;

/// Largest client dimension a request may ask for.
pub const MAX_TARGET_PX: i32 = 16_384;

/// One resize operation. Targets are physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeRequest {
    pub handle: WindowHandle,
    pub width: i32,
    pub height: i32,
    /// Where the client area's top-left should land. `None` keeps the
    /// window's current outer top-left.
    pub top_left: Option<Point>,
}

impl ResizeRequest {
    pub fn new(handle: WindowHandle, width: i32, height: i32) -> Self {
        Self {
            handle,
            width,
            height,
            top_left: None,
        }
    }

    /// Also moves the client area's top-left to `point`.
    pub fn at(mut self, point: Point) -> Self {
        self.top_left = Some(point);
        self
    }

    pub fn target(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Terminal state of a resize that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Client area within tolerance of the request.
    Success,
    /// The OS declined or altered the placement; the caller decides whether
    /// to retry or accept.
    PartialSuccess,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::PartialSuccess => f.write_str("partial"),
        }
    }
}

/// The outer rectangle that yields the requested client area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub outer: Rect,
    /// Outer to client, per edge.
    pub margins: Insets,
}

/// Every rectangle measured and computed during one resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub before: Geometry,
    pub margins: FrameMargins,
    pub placed: Rect,
    pub after: Geometry,
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let before = self.before.client.size();
        let after = self.after.client.size();
        writeln!(f, "── Resize {} ──", self.before.handle)?;
        writeln!(f, "{}", self.before)?;
        writeln!(
            f,
            "  Calling  : place(x={}, y={}, w={}, h={})  [Δclient w={:+} h={:+}]",
            self.placed.left,
            self.placed.top,
            self.placed.width(),
            self.placed.height(),
            self.placed.width() - self.before.outer.width(),
            self.placed.height() - self.before.outer.height(),
        )?;
        write!(
            f,
            "  After    : outer={}  visible={}  client={} (was {})",
            self.after.outer,
            self.after.visible.size(),
            after,
            before
        )
    }
}

/// What a resize achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeResult {
    pub handle: WindowHandle,
    pub outcome: Outcome,
    pub requested: Size,
    pub requested_top_left: Option<Point>,
    pub achieved_outer: Rect,
    pub achieved_client: Rect,
    pub trace: Trace,
}

impl ResizeResult {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn achieved_size(&self) -> Size {
        self.achieved_client.size()
    }

    /// Achieved minus requested client size.
    pub fn delta(&self) -> Size {
        let achieved = self.achieved_size();
        Size::new(
            achieved.width - self.requested.width,
            achieved.height - self.requested.height,
        )
    }
}

/// Computes the outer rectangle that puts a `request`-sized client area
/// inside a window with `geometry`'s margins.
///
/// Margins come straight from outer vs client, so both the drop shadow and
/// the non-client frame are compensated for. Returns `None` when the outer
/// rectangle would not fit in `i32` screen coordinates.
pub fn plan(geometry: &Geometry, request: &ResizeRequest) -> Option<Placement> {
    let margins = Insets::between(&geometry.outer, &geometry.client);
    let origin = match request.top_left {
        Some(client_origin) => Point::new(
            client_origin.x.checked_sub(margins.left)?,
            client_origin.y.checked_sub(margins.top)?,
        ),
        None => geometry.outer.top_left(),
    };
    let width = request.width.checked_add(margins.horizontal())?;
    let height = request.height.checked_add(margins.vertical())?;

    Some(Placement {
        outer: Rect::new(
            origin.x,
            origin.y,
            origin.x.checked_add(width)?,
            origin.y.checked_add(height)?,
        ),
        margins,
    })
}

/// Resizes a window so its client area is exactly the requested size.
///
/// Issues exactly one placement call and re-measures afterwards. Never
/// retries; a [`Outcome::PartialSuccess`] carries the achieved size so the
/// caller can decide.
pub fn resize<D>(desktop: &D, request: &ResizeRequest) -> Result<ResizeResult, ResizeError>
where
    D: Desktop + ?Sized,
{
    let handle = request.handle;
    let invalid_target = || ResizeError::InvalidTarget {
        width: request.width,
        height: request.height,
    };
    let valid = 1..=MAX_TARGET_PX;
    if !valid.contains(&request.width) || !valid.contains(&request.height) {
        return Err(invalid_target());
    }

    let before = inspector::measure(desktop, handle)?;
    let placement = plan(&before, request).ok_or_else(invalid_target)?;

    desktop.place(handle, placement.outer).map_err(|source| {
        if desktop.is_window(handle) {
            ResizeError::Placement { handle, source }
        } else {
            MeasurementError::InvalidHandle { handle }.into()
        }
    })?;

    let after = inspector::measure(desktop, handle).map_err(|source| {
        log_warn!(
            "resize {handle}: placed at {} but re-measure failed: {source}",
            placement.outer
        );
        ResizeError::Verification {
            handle,
            placed: placement.outer,
            source,
        }
    })?;
    let outcome = verify(&after, request);
    let trace = Trace {
        before,
        margins: before.margins(),
        placed: placement.outer,
        after,
    };
    log_debug!("{trace}");

    let result = ResizeResult {
        handle,
        outcome,
        requested: request.target(),
        requested_top_left: request.top_left,
        achieved_outer: after.outer,
        achieved_client: after.client,
        trace,
    };

    match outcome {
        Outcome::Success => log_info!(
            "resize {handle}: client {} (requested {})",
            result.achieved_size(),
            result.requested
        ),
        Outcome::PartialSuccess => log_warn!(
            "resize {handle}: client {} at {} (requested {}), placement was adjusted",
            result.achieved_size(),
            after.client.top_left(),
            result.requested
        ),
    }

    Ok(result)
}

/// Compares the re-measured client area against the request.
fn verify(after: &Geometry, request: &ResizeRequest) -> Outcome {
    let size_ok = after.client.size().within(request.target(), TOLERANCE_PX);
    let position_ok = request.top_left.is_none_or(|wanted| {
        let got = after.client.top_left();
        (got.x - wanted.x).abs() <= TOLERANCE_PX && (got.y - wanted.y).abs() <= TOLERANCE_PX
    });

    if size_ok && position_ok {
        Outcome::Success
    } else {
        Outcome::PartialSuccess
    }
}

/// Whether a window's client area already has the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeStatus {
    AlreadyCorrect,
    NeedsResize,
}

/// A window's current client size against a target, for the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeCheck {
    pub handle: WindowHandle,
    pub client: Size,
    pub status: SizeStatus,
}

/// Measures a window and reports whether it already matches `target`.
pub fn check<M>(
    provider: &M,
    handle: WindowHandle,
    target: Size,
) -> Result<SizeCheck, MeasurementError>
where
    M: MeasurementProvider + ?Sized,
{
    let geometry = inspector::measure(provider, handle)?;
    let client = geometry.client.size();
    let status = if client.within(target, TOLERANCE_PX) {
        SizeStatus::AlreadyCorrect
    } else {
        SizeStatus::NeedsResize
    };
    Ok(SizeCheck {
        handle,
        client,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Layer, QueryError};
    use crate::fake::{FakeDesktop, FakeWindow};
    use crate::provider::ShowState;
    use crate::rect::Edge;

    const HWND: WindowHandle = WindowHandle::new(0x1F0A2);

    /// 8px border, 31px title bar, 84px shadow on the right.
    fn standard() -> FakeWindow {
        FakeWindow::new(
            Rect::new(100, 100, 1940, 1200),
            Insets::new(0, 0, 84, 8),
            Insets::new(8, 31, 8, 21),
        )
    }

    fn full_hd(handle: WindowHandle) -> ResizeRequest {
        ResizeRequest::new(handle, 1920, 1080)
    }

    #[test]
    fn standard_window_lands_on_exact_client_size() {
        // Arrange
        let desktop = FakeDesktop::new().with_window(HWND, standard());

        // Act
        let result = resize(&desktop, &full_hd(HWND)).unwrap();

        // Assert
        assert_eq!(
            desktop.placements(),
            vec![(HWND, Rect::from_origin_size(100, 100, 2020, 1140))]
        );
        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.achieved_size(), Size::new(1920, 1080));
        assert_eq!(result.delta(), Size::new(0, 0));
        assert_eq!(result.trace.margins.total(), Insets::new(8, 31, 92, 29));
    }

    #[test]
    fn margin_conservation_holds_for_any_margins() {
        let cases = [
            (Insets::default(), Insets::default()),
            (Insets::new(7, 0, 7, 7), Insets::new(1, 31, 1, 1)),
            (Insets::new(0, 0, 84, 8), Insets::new(8, 31, 8, 21)),
            (Insets::new(3, 12, 40, 0), Insets::new(0, 0, 0, 0)),
        ];

        for (shadow, frame) in cases {
            // Arrange
            let window = FakeWindow::new(Rect::new(50, 60, 850, 660), shadow, frame);
            let desktop = FakeDesktop::new().with_window(HWND, window);
            let before = inspector::measure(&desktop, HWND).unwrap();
            let total = shadow + frame;

            // Act
            let placement = plan(&before, &ResizeRequest::new(HWND, 1280, 720)).unwrap();

            // Assert
            assert_eq!(placement.margins, total);
            assert_eq!(
                placement.outer.size(),
                Size::new(1280 + total.left + total.right, 720 + total.top + total.bottom)
            );
            assert_eq!(placement.outer.top_left(), Point::new(50, 60));
        }
    }

    #[test]
    fn resizing_window_already_at_target_is_idempotent() {
        for (shadow, frame) in [
            (Insets::new(7, 0, 7, 7), Insets::new(1, 31, 1, 1)),
            (Insets::new(0, 0, 84, 8), Insets::new(8, 31, 8, 21)),
            (Insets::default(), Insets::new(2, 2, 2, 2)),
        ] {
            // Arrange
            let client = Rect::from_origin_size(200, 150, 1920, 1080);
            let outer = client.outset(&frame).outset(&shadow);
            let desktop =
                FakeDesktop::new().with_window(HWND, FakeWindow::new(outer, shadow, frame));

            // Act
            let result = resize(&desktop, &full_hd(HWND)).unwrap();

            // Assert
            assert!(result.is_success());
            assert_eq!(result.delta(), Size::new(0, 0));
            assert_eq!(result.achieved_outer, outer);
            assert_eq!(result.achieved_client, client);
            assert_eq!(result.trace.before, result.trace.after);
        }
    }

    #[test]
    fn target_position_places_client_not_frame() {
        // Arrange
        let desktop = FakeDesktop::new().with_window(HWND, standard());
        let request = full_hd(HWND).at(Point::new(0, 0));

        // Act
        let result = resize(&desktop, &request).unwrap();

        // Assert
        assert!(result.is_success());
        assert_eq!(result.achieved_client, Rect::new(0, 0, 1920, 1080));
        assert_eq!(result.achieved_outer.top_left(), Point::new(-8, -31));
    }

    #[test]
    fn target_position_on_secondary_monitor() {
        let desktop = FakeDesktop::new().with_window(HWND, standard());
        let request = ResizeRequest::new(HWND, 1280, 720).at(Point::new(2560, -200));

        let result = resize(&desktop, &request).unwrap();

        assert!(result.is_success());
        assert_eq!(result.achieved_client.top_left(), Point::new(2560, -200));
        assert_eq!(result.achieved_size(), Size::new(1280, 720));
    }

    #[test]
    fn closed_window_fails_without_placement() {
        // Arrange
        let mut window = standard();
        window.alive = false;
        let desktop = FakeDesktop::new().with_window(HWND, window);

        // Act
        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        // Assert
        assert!(err.is_invalid_handle());
        assert!(desktop.placements().is_empty());
    }

    #[test]
    fn window_closed_during_placement_is_invalid_handle() {
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .closing_on_place();

        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        assert_eq!(
            err,
            ResizeError::Measurement(MeasurementError::InvalidHandle { handle: HWND })
        );
    }

    #[test]
    fn maximized_window_is_unsupported_without_placement() {
        let mut window = standard();
        window.state = ShowState::Maximized;
        let desktop = FakeDesktop::new().with_window(HWND, window);

        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        assert_eq!(
            err,
            ResizeError::Measurement(MeasurementError::Unsupported {
                handle: HWND,
                state: ShowState::Maximized,
            })
        );
        assert!(desktop.placements().is_empty());
    }

    #[test]
    fn negative_margin_fails_fast() {
        // Arrange
        let mut window = standard();
        window.visible_override = Some(Rect::new(90, 100, 1856, 1192));
        let desktop = FakeDesktop::new().with_window(HWND, window);

        // Act
        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        // Assert
        assert_eq!(
            err,
            ResizeError::Measurement(MeasurementError::Inconsistent {
                handle: HWND,
                layer: Layer::Shadow,
                edge: Edge::Left,
                delta: -10,
            })
        );
        assert!(desktop.placements().is_empty());
    }

    #[test]
    fn composition_disabled_uses_outer_and_client_only() {
        // Arrange
        let mut window = FakeWindow::new(
            Rect::new(0, 0, 816, 639),
            Insets::default(),
            Insets::new(8, 31, 8, 8),
        );
        window.composited = false;
        let desktop = FakeDesktop::new().with_window(HWND, window);

        // Act
        let result = resize(&desktop, &full_hd(HWND)).unwrap();

        // Assert
        assert!(result.is_success());
        assert!(!result.trace.before.composited);
        assert_eq!(desktop.placements()[0].1.size(), Size::new(1936, 1119));
    }

    #[test]
    fn window_manager_clamp_is_partial_success() {
        // Arrange: a tiling manager caps outer width at 1600px.
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .with_constraint(|r| {
                Rect::from_origin_size(r.left, r.top, r.width().min(1600), r.height())
            });

        // Act
        let result = resize(&desktop, &full_hd(HWND)).unwrap();

        // Assert
        assert_eq!(result.outcome, Outcome::PartialSuccess);
        assert_eq!(result.achieved_size(), Size::new(1500, 1080));
        assert_eq!(result.delta(), Size::new(-420, 0));
        assert_eq!(desktop.placements().len(), 1);
    }

    #[test]
    fn one_pixel_rounding_is_success() {
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .with_constraint(|r| Rect::new(r.left, r.top, r.right - 1, r.bottom + 1));

        let result = resize(&desktop, &full_hd(HWND)).unwrap();

        assert!(result.is_success());
        assert_eq!(result.achieved_size(), Size::new(1919, 1081));
    }

    #[test]
    fn moved_position_outside_tolerance_is_partial() {
        // Snapping moves the window 12px right.
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .with_constraint(|r| r.offset(12, 0));

        let result = resize(&desktop, &full_hd(HWND).at(Point::new(0, 0))).unwrap();

        assert_eq!(result.outcome, Outcome::PartialSuccess);
        assert_eq!(result.achieved_size(), Size::new(1920, 1080));
        assert_eq!(result.achieved_client.top_left(), Point::new(12, 0));
    }

    #[test]
    fn margins_are_remeasured_on_every_call() {
        // Arrange
        let desktop = FakeDesktop::new().with_window(HWND, standard());
        resize(&desktop, &full_hd(HWND)).unwrap();

        // Act: a theme change thickens the borders between calls.
        desktop.update(HWND, |w| w.frame = Insets::new(12, 40, 12, 12));
        let result = resize(&desktop, &full_hd(HWND)).unwrap();

        // Assert
        assert!(result.is_success());
        assert_eq!(result.trace.margins.frame, Insets::new(12, 40, 12, 12));
        assert_eq!(
            desktop.placements()[1].1.size(),
            Size::new(1920 + 12 + 12 + 84, 1080 + 40 + 12 + 8)
        );
    }

    #[test]
    fn non_positive_target_is_rejected_before_any_query() {
        let desktop = FakeDesktop::new().with_window(HWND, standard());

        let err = resize(&desktop, &ResizeRequest::new(HWND, 0, 1080)).unwrap_err();

        assert_eq!(
            err,
            ResizeError::InvalidTarget {
                width: 0,
                height: 1080
            }
        );
        assert!(desktop.placements().is_empty());
    }

    #[test]
    fn oversized_target_is_rejected_before_any_query() {
        for (width, height) in [(i32::MAX, 1080), (1920, MAX_TARGET_PX + 1)] {
            let desktop = FakeDesktop::new().with_window(HWND, standard());

            let err = resize(&desktop, &ResizeRequest::new(HWND, width, height)).unwrap_err();

            assert_eq!(err, ResizeError::InvalidTarget { width, height });
            assert!(desktop.placements().is_empty());
        }
    }

    #[test]
    fn largest_target_is_planned_with_margins() {
        let desktop = FakeDesktop::new().with_window(HWND, standard());
        let before = inspector::measure(&desktop, HWND).unwrap();

        let placement =
            plan(&before, &ResizeRequest::new(HWND, MAX_TARGET_PX, MAX_TARGET_PX)).unwrap();

        assert_eq!(
            placement.outer.size(),
            Size::new(MAX_TARGET_PX + 100, MAX_TARGET_PX + 60)
        );
    }

    #[test]
    fn position_past_screen_coordinates_is_invalid_target() {
        // Arrange
        let desktop = FakeDesktop::new().with_window(HWND, standard());
        let request = full_hd(HWND).at(Point::new(i32::MAX - 100, i32::MIN));

        // Act
        let err = resize(&desktop, &request).unwrap_err();

        // Assert
        assert_eq!(
            err,
            ResizeError::InvalidTarget {
                width: 1920,
                height: 1080
            }
        );
        assert!(desktop.placements().is_empty());
    }

    #[test]
    fn rejected_placement_on_live_window_is_placement_error() {
        // Arrange
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .failing_on_place();

        // Act
        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        // Assert
        assert_eq!(
            err,
            ResizeError::Placement {
                handle: HWND,
                source: QueryError::new("place", "access denied"),
            }
        );
        assert!(!err.is_invalid_handle());
        assert!(desktop.placements().is_empty());
        assert_eq!(desktop.window(HWND).unwrap().outer, standard().outer);
    }

    #[test]
    fn query_failure_before_placement_is_reported_without_placing() {
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .failing_query("client_rect");

        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        assert_eq!(
            err,
            ResizeError::Measurement(MeasurementError::Query {
                handle: HWND,
                source: QueryError::new("client_rect", "injected failure"),
            })
        );
        assert!(desktop.placements().is_empty());
    }

    #[test]
    fn maximized_by_placement_keeps_the_issued_rect() {
        // Arrange: snapping to the top edge maximizes the window.
        let desktop = FakeDesktop::new()
            .with_window(HWND, standard())
            .showing_after_place(ShowState::Maximized);

        // Act
        let err = resize(&desktop, &full_hd(HWND)).unwrap_err();

        // Assert
        assert_eq!(
            err,
            ResizeError::Verification {
                handle: HWND,
                placed: Rect::from_origin_size(100, 100, 2020, 1140),
                source: MeasurementError::Unsupported {
                    handle: HWND,
                    state: ShowState::Maximized,
                },
            }
        );
        assert_eq!(desktop.placements().len(), 1);
        assert!(err.to_string().contains("size=2020x1140"));
    }

    #[test]
    fn check_reports_already_correct_within_tolerance() {
        let client = Rect::from_origin_size(0, 0, 1921, 1080);
        let frame = Insets::new(1, 31, 1, 1);
        let desktop = FakeDesktop::new().with_window(
            HWND,
            FakeWindow::new(client.outset(&frame), Insets::default(), frame),
        );

        let status = check(&desktop, HWND, Size::new(1920, 1080)).unwrap();

        assert_eq!(status.status, SizeStatus::AlreadyCorrect);
        assert_eq!(status.client, Size::new(1921, 1080));
    }

    #[test]
    fn check_reports_needs_resize() {
        let desktop = FakeDesktop::new().with_window(HWND, standard());

        let status = check(&desktop, HWND, Size::new(1920, 1080)).unwrap();

        assert_eq!(status.status, SizeStatus::NeedsResize);
        assert_eq!(status.client, Size::new(1740, 1040));
    }

    #[test]
    fn trace_renders_every_rectangle() {
        let desktop = FakeDesktop::new().with_window(HWND, standard());

        let result = resize(&desktop, &full_hd(HWND)).unwrap();
        let text = result.trace.to_string();

        assert!(text.contains("Outer    : pos=(100,100) size=1840x1100"));
        assert!(text.contains("Shadow   : L=0 T=0 R=84 B=8"));
        assert!(text.contains("NC frame : L=8 T=31 R=8 B=21"));
        assert!(text.contains("place(x=100, y=100, w=2020, h=1140)"));
        assert!(text.contains("client=1920x1080 (was 1740x1040)"));
    }
}
