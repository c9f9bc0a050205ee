use std::fmt;

use serde::Serialize;

/// A rectangle in physical-pixel screen coordinates.
///
/// Stored as edges rather than origin + extent because every comparison
/// the engine makes is an edge-wise subtraction between nested rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from its top-left corner and extent.
    pub fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Shrinks each edge inward by the matching inset.
    pub fn inset(&self, insets: &Insets) -> Self {
        Self::new(
            self.left + insets.left,
            self.top + insets.top,
            self.right - insets.right,
            self.bottom - insets.bottom,
        )
    }

    /// Grows each edge outward by the matching inset.
    pub fn outset(&self, insets: &Insets) -> Self {
        Self::new(
            self.left - insets.left,
            self.top - insets.top,
            self.right + insets.right,
            self.bottom + insets.bottom,
        )
    }

    /// Returns the same rectangle shifted by `(dx, dy)`.
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pos=({},{}) size={}x{}",
            self.left,
            self.top,
            self.width(),
            self.height()
        )
    }
}

/// A point in physical-pixel screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A width/height pair in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are within `tolerance` pixels of `other`.
    pub fn within(&self, other: Size, tolerance: i32) -> bool {
        (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Per-edge distances between an outer and an inner rectangle.
///
/// Positive values mean the inner edge sits inside the outer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Edge-wise distance from `outer` in to `inner`.
    pub fn between(outer: &Rect, inner: &Rect) -> Self {
        Self {
            left: inner.left - outer.left,
            top: inner.top - outer.top,
            right: outer.right - inner.right,
            bottom: outer.bottom - inner.bottom,
        }
    }

    /// Left + right.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Top + bottom.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Returns the first edge (in left, top, right, bottom order) with a
    /// negative inset, if any.
    pub fn first_negative(&self) -> Option<(Edge, i32)> {
        [
            (Edge::Left, self.left),
            (Edge::Top, self.top),
            (Edge::Right, self.right),
            (Edge::Bottom, self.bottom),
        ]
        .into_iter()
        .find(|&(_, delta)| delta < 0)
    }
}

impl std::ops::Add for Insets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

impl fmt::Display for Insets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L={} T={} R={} B={}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
