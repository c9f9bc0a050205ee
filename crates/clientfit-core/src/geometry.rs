use std::fmt;

use serde::Serialize;

use crate::error::{Layer, MeasurementError};
use crate::handle::WindowHandle;
use crate::rect::{Insets, Rect};

/// DPI of an unscaled (100%) display.
pub const BASE_DPI: u32 = 96;

/// A window's display scaling, queried per window.
///
/// Diagnostic only: targets are always physical pixels and are never
/// rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleFactor {
    dpi: u32,
}

impl ScaleFactor {
    pub const DEFAULT: Self = Self { dpi: BASE_DPI };

    /// Returns `None` for a zero DPI, which Win32 reports on failure.
    pub fn from_dpi(dpi: u32) -> Option<Self> {
        (dpi > 0).then_some(Self { dpi })
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// DPI / 96.
    pub fn factor(&self) -> f64 {
        f64::from(self.dpi) / f64::from(BASE_DPI)
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% ({} dpi)",
            (self.factor() * 100.0).round(),
            self.dpi
        )
    }
}

/// Gap between a window's outer rectangle and its client area, split into
/// the compositor shadow and the non-client frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FrameMargins {
    /// Outer rect to visible frame.
    pub shadow: Insets,
    /// Visible frame to client area (title bar + borders).
    pub frame: Insets,
}

impl FrameMargins {
    /// Outer rect to client area, both layers combined.
    pub fn total(&self) -> Insets {
        self.shadow + self.frame
    }
}

/// A snapshot of a window's three nested rectangles at one instant.
///
/// The rectangles are independent values; relationships between them are
/// derived by edge-wise subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub handle: WindowHandle,
    /// Bounding rectangle, drop shadow included.
    pub outer: Rect,
    /// Compositor frame bounds. Equal to `outer` when not composited.
    pub visible: Rect,
    /// Client area mapped to screen coordinates.
    pub client: Rect,
    pub scale: ScaleFactor,
    /// Whether `visible` came from the compositor rather than the fallback.
    pub composited: bool,
}

impl Geometry {
    /// Splits the outer-to-client gap into shadow and frame layers.
    pub fn margins(&self) -> FrameMargins {
        FrameMargins {
            shadow: Insets::between(&self.outer, &self.visible),
            frame: Insets::between(&self.visible, &self.client),
        }
    }

    /// Checks that the client area nests inside the visible frame, which
    /// nests inside the outer rectangle, on every edge.
    pub fn validate(&self) -> Result<FrameMargins, MeasurementError> {
        let margins = self.margins();
        for (layer, insets) in [(Layer::Shadow, margins.shadow), (Layer::Frame, margins.frame)] {
            if let Some((edge, delta)) = insets.first_negative() {
                return Err(MeasurementError::Inconsistent {
                    handle: self.handle,
                    layer,
                    edge,
                    delta,
                });
            }
        }
        Ok(margins)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let margins = self.margins();
        let visible_note = if self.composited { "" } else { "  (no composition)" };
        writeln!(f, "  Outer    : {}", self.outer)?;
        writeln!(f, "  Visible  : {}{visible_note}", self.visible)?;
        writeln!(f, "  Shadow   : {}", margins.shadow)?;
        writeln!(
            f,
            "  NC frame : {}  (title bar={}px)",
            margins.frame, margins.frame.top
        )?;
        writeln!(f, "  Client   : {}", self.client)?;
        write!(f, "  Scale    : {}", self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Edge;

    fn geometry(outer: Rect, visible: Rect, client: Rect) -> Geometry {
        Geometry {
            handle: WindowHandle::new(0x10),
            outer,
            visible,
            client,
            scale: ScaleFactor::DEFAULT,
            composited: true,
        }
    }

    #[test]
    fn margins_split_into_shadow_and_frame() {
        // Arrange
        let geo = geometry(
            Rect::new(100, 100, 1940, 1200),
            Rect::new(100, 100, 1856, 1192),
            Rect::new(108, 131, 1848, 1171),
        );

        // Act
        let margins = geo.validate().unwrap();

        // Assert
        assert_eq!(margins.shadow, Insets::new(0, 0, 84, 8));
        assert_eq!(margins.frame, Insets::new(8, 31, 8, 21));
        assert_eq!(margins.total(), Insets::new(8, 31, 92, 29));
    }

    #[test]
    fn visible_wider_than_outer_is_inconsistent() {
        let geo = geometry(
            Rect::new(100, 100, 900, 700),
            Rect::new(96, 100, 900, 700),
            Rect::new(104, 130, 892, 692),
        );

        let err = geo.validate().unwrap_err();

        assert_eq!(
            err,
            MeasurementError::Inconsistent {
                handle: WindowHandle::new(0x10),
                layer: Layer::Shadow,
                edge: Edge::Left,
                delta: -4,
            }
        );
    }

    #[test]
    fn client_outside_visible_frame_is_inconsistent() {
        let geo = geometry(
            Rect::new(0, 0, 800, 600),
            Rect::new(7, 0, 793, 593),
            Rect::new(7, 31, 793, 600),
        );

        let err = geo.validate().unwrap_err();

        assert!(matches!(
            err,
            MeasurementError::Inconsistent {
                layer: Layer::Frame,
                edge: Edge::Bottom,
                delta: -7,
                ..
            }
        ));
    }

    #[test]
    fn scale_factor_rejects_zero_dpi() {
        assert_eq!(ScaleFactor::from_dpi(0), None);

        let scale = ScaleFactor::from_dpi(144).unwrap();
        assert_eq!(scale.factor(), 1.5);
        assert_eq!(scale.to_string(), "150% (144 dpi)");
    }
}
