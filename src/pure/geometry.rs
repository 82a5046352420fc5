//! Geometry primitives
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An x,y coordinate pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// An absolute x coordinate relative to the root window
    pub x: i32,
    /// An absolute y coordinate relative to the root window
    pub y: i32,
}

impl Point {
    /// Create a new Point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from(raw: (i32, i32)) -> Self {
        let (x, y) = raw;

        Self { x, y }
    }
}

// A Rect converts to its top left corner
impl From<Rect> for Point {
    fn from(r: Rect) -> Self {
        let Rect { x, y, .. } = r;

        Self { x, y }
    }
}

/// A width and height pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Size {
    /// Create a new Size.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// A size is only usable for a window if both dimensions are non-zero.
    pub fn is_positive(&self) -> bool {
        self.w > 0 && self.h > 0
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        let Rect { w, h, .. } = r;

        Self { w, h }
    }
}

/// An X window / screen position: top left corner + extent
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rect {
    /// The x-coordinate of the top left corner of this rect
    pub x: i32,
    /// The y-coordinate of the top left corner of this rect
    pub y: i32,
    /// The width of this rect
    pub w: u32,
    /// The height of this rect
    pub h: u32,
}

impl Rect {
    /// Create a new Rect.
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Build a Rect from a location and a size.
    pub fn from_parts(p: Point, s: Size) -> Rect {
        Rect::new(p.x, p.y, s.w, s.h)
    }

    /// The top left corner of this rect.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The width and height of this rect.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
}
