//! Deterministic in-memory desktop for exercising the engine without a
//! display.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::QueryError;
use crate::handle::WindowHandle;
use crate::provider::{MeasurementProvider, PlacementProvider, ShowState};
use crate::rect::{Insets, Point, Rect};

/// A simulated top-level window.
///
/// Placement moves the outer rectangle and keeps the per-edge margins,
/// the way a real window manager re-lays out the non-client area.
#[derive(Debug, Clone)]
pub(crate) struct FakeWindow {
    pub outer: Rect,
    /// Outer rect to visible frame.
    pub shadow: Insets,
    /// Visible frame to client area.
    pub frame: Insets,
    pub state: ShowState,
    pub composited: bool,
    pub dpi: u32,
    pub alive: bool,
    /// Replaces the derived visible rect, for injecting broken geometry.
    pub visible_override: Option<Rect>,
    /// Top-left of the monitor the window is on.
    pub monitor: Point,
}

impl FakeWindow {
    pub fn new(outer: Rect, shadow: Insets, frame: Insets) -> Self {
        Self {
            outer,
            shadow,
            frame,
            state: ShowState::Normal,
            composited: true,
            dpi: 96,
            alive: true,
            visible_override: None,
            monitor: Point::default(),
        }
    }

    pub fn visible(&self) -> Rect {
        self.visible_override
            .unwrap_or_else(|| self.outer.inset(&self.shadow))
    }

    /// Client area in screen coordinates.
    pub fn client(&self) -> Rect {
        self.outer.inset(&self.shadow).inset(&self.frame)
    }
}

type Constraint = Box<dyn Fn(Rect) -> Rect>;

#[derive(Default)]
pub(crate) struct FakeDesktop {
    windows: RefCell<HashMap<WindowHandle, FakeWindow>>,
    placements: RefCell<Vec<(WindowHandle, Rect)>>,
    constraint: Option<Constraint>,
    close_on_place: bool,
    fail_on_place: bool,
    failing_query: Option<&'static str>,
    state_after_place: Option<ShowState>,
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(self, handle: WindowHandle, window: FakeWindow) -> Self {
        self.windows.borrow_mut().insert(handle, window);
        self
    }

    /// Lets the simulated window manager adjust every requested outer rect.
    pub fn with_constraint(mut self, constraint: impl Fn(Rect) -> Rect + 'static) -> Self {
        self.constraint = Some(Box::new(constraint));
        self
    }

    /// Closes the target window as soon as a placement is attempted.
    pub fn closing_on_place(mut self) -> Self {
        self.close_on_place = true;
        self
    }

    /// Rejects every placement while leaving the window alive.
    pub fn failing_on_place(mut self) -> Self {
        self.fail_on_place = true;
        self
    }

    /// Makes the named query fail for every live window.
    pub fn failing_query(mut self, query: &'static str) -> Self {
        self.failing_query = Some(query);
        self
    }

    /// Switches the window to `state` once a placement has been applied,
    /// the way snapping to a screen edge can maximize it.
    pub fn showing_after_place(mut self, state: ShowState) -> Self {
        self.state_after_place = Some(state);
        self
    }

    pub fn window(&self, handle: WindowHandle) -> Option<FakeWindow> {
        self.windows.borrow().get(&handle).cloned()
    }

    /// Mutates a window in place, e.g. to simulate a theme change.
    pub fn update(&self, handle: WindowHandle, change: impl FnOnce(&mut FakeWindow)) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&handle) {
            change(window);
        }
    }

    pub fn placements(&self) -> Vec<(WindowHandle, Rect)> {
        self.placements.borrow().clone()
    }

    fn live(&self, handle: WindowHandle, query: &'static str) -> Result<FakeWindow, QueryError> {
        if self.failing_query == Some(query) && self.is_window(handle) {
            return Err(QueryError::new(query, "injected failure"));
        }
        match self.windows.borrow().get(&handle) {
            Some(w) if w.alive => Ok(w.clone()),
            _ => Err(QueryError::new(query, "invalid window handle")),
        }
    }
}

impl MeasurementProvider for FakeDesktop {
    fn is_window(&self, handle: WindowHandle) -> bool {
        self.windows
            .borrow()
            .get(&handle)
            .is_some_and(|w| w.alive)
    }

    fn show_state(&self, handle: WindowHandle) -> Result<ShowState, QueryError> {
        Ok(self.live(handle, "show_state")?.state)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, QueryError> {
        Ok(self.live(handle, "window_rect")?.outer)
    }

    fn frame_bounds(&self, handle: WindowHandle) -> Result<Option<Rect>, QueryError> {
        let window = self.live(handle, "frame_bounds")?;
        Ok(window.composited.then(|| window.visible()))
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, QueryError> {
        let client = self.live(handle, "client_rect")?.client();
        Ok(Rect::from_origin_size(0, 0, client.width(), client.height()))
    }

    fn client_to_screen(&self, handle: WindowHandle, point: Point) -> Result<Point, QueryError> {
        let origin = self.live(handle, "client_to_screen")?.client().top_left();
        Ok(Point::new(origin.x + point.x, origin.y + point.y))
    }

    fn dpi(&self, handle: WindowHandle) -> Result<u32, QueryError> {
        Ok(self.live(handle, "dpi")?.dpi)
    }

    fn monitor_origin(&self, handle: WindowHandle) -> Result<Point, QueryError> {
        Ok(self.live(handle, "monitor_origin")?.monitor)
    }
}

impl PlacementProvider for FakeDesktop {
    fn place(&self, handle: WindowHandle, outer: Rect) -> Result<(), QueryError> {
        let mut windows = self.windows.borrow_mut();
        let window = windows
            .get_mut(&handle)
            .filter(|w| w.alive)
            .ok_or_else(|| QueryError::new("place", "invalid window handle"))?;

        if self.close_on_place {
            window.alive = false;
            return Err(QueryError::new("place", "invalid window handle"));
        }
        if self.fail_on_place {
            return Err(QueryError::new("place", "access denied"));
        }

        let applied = match &self.constraint {
            Some(constrain) => constrain(outer),
            None => outer,
        };
        window.outer = applied;
        if let Some(state) = self.state_after_place {
            window.state = state;
        }
        self.placements.borrow_mut().push((handle, outer));
        Ok(())
    }
}
