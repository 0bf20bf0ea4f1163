//! Integer geometry shared by every layout computation.
//!
//! All coordinates are device units. A rectangle's position is expressed in
//! whatever coordinate space its adapter uses; the engine never converts
//! between spaces.

use std::ops::{Add, AddAssign, Sub};

use glam::IVec2;

/// A position in device units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<IVec2> for Point {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for IVec2 {
    fn from(p: Point) -> Self {
        IVec2::new(p.x, p.y)
    }
}

/// A width/height pair in device units.
///
/// When used as a maximum size, a zero component means "unbounded" on that
/// axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both components are zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Raise each component to at least `minimum`.
    pub fn at_least(self, minimum: Size) -> Size {
        self.max(minimum)
    }

    /// Lower each component to at most `maximum`, skipping zero (unbounded)
    /// components.
    pub fn at_most(self, maximum: Size) -> Size {
        let width = if maximum.width != 0 && maximum.width < self.width {
            maximum.width
        } else {
            self.width
        };
        let height = if maximum.height != 0 && maximum.height < self.height {
            maximum.height
        } else {
            self.height
        };
        Size::new(width, height)
    }

    /// Clamp into `[minimum, maximum]`. The maximum is applied last, so it
    /// wins over a larger minimum.
    pub fn clamp_to(self, minimum: Size, maximum: Size) -> Size {
        self.at_least(minimum).at_most(maximum)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl AddAssign for Size {
    fn add_assign(&mut self, rhs: Size) {
        self.width += rhs.width;
        self.height += rhs.height;
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl From<IVec2> for Size {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Size> for IVec2 {
    fn from(s: Size) -> Self {
        IVec2::new(s.width, s.height)
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a rectangle from position and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a location and a size.
    pub fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// Create a rectangle from position and size vectors.
    pub fn from_vecs(position: IVec2, size: IVec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Position as a vector.
    pub fn position_vec(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Size as a vector.
    pub fn size_vec(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Get the right edge (x + width).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Get the bottom edge (y + height).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Same location, different size.
    pub fn with_size(&self, size: Size) -> Rect {
        Rect::from_parts(self.location(), size)
    }

    /// Move the edges inward by the given insets.
    pub fn shrink(&self, insets: Margin) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            self.width - insets.horizontal(),
            self.height - insets.vertical(),
        )
    }

    /// Move the edges outward by the given insets.
    pub fn expand(&self, insets: Margin) -> Rect {
        Rect::new(
            self.x - insets.left,
            self.y - insets.top,
            self.width + insets.horizontal(),
            self.height + insets.vertical(),
        )
    }
}

/// Four independent edge insets, used for both margin and padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margin {
    pub const ZERO: Self = Self::uniform(0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Create uniform insets.
    pub const fn uniform(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Create symmetric insets.
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }

    /// The shared value when all four edges are equal.
    pub fn uniform_value(&self) -> Option<i32> {
        (self.left == self.top && self.left == self.right && self.left == self.bottom)
            .then_some(self.left)
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Space taken on both axes.
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }
}

impl Add for Margin {
    type Output = Margin;

    fn add(self, rhs: Margin) -> Margin {
        Margin::new(
            self.left + rhs.left,
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
        )
    }
}

impl Sub for Margin {
    type Output = Margin;

    fn sub(self, rhs: Margin) -> Margin {
        Margin::new(
            self.left - rhs.left,
            self.top - rhs.top,
            self.right - rhs.right,
            self.bottom - rhs.bottom,
        )
    }
}
