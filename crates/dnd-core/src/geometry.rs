#![forbid(unsafe_code)]

//! Geometric primitives.

/// A point in client-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The sentinel origin a stopped drag resets the pointer cell to.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Rendered box metrics of an element, relative to its offset parent.
///
/// Mirrors `offsetLeft` / `offsetTop` / `offsetWidth` / `offsetHeight`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementBox {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Rendered width.
    pub width: f64,
    /// Rendered height.
    pub height: f64,
}

impl ElementBox {
    /// Create new box metrics.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Translation that moves this box so its center sits under `pointer`.
    #[inline]
    pub fn centering_offset(&self, pointer: Point) -> Translate {
        Translate::new(
            pointer.x - self.left - self.width / 2.0,
            pointer.y - self.top - self.height / 2.0,
        )
    }

    /// Check if a point is inside the box (right and bottom edges exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.left + self.width
            && point.y >= self.top
            && point.y < self.top + self.height
    }
}

/// A 2D translation in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

impl Translate {
    /// Identity translation.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new translation.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether this is the identity translation.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
