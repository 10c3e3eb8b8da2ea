//! Basic geometry and color types for sprite nodes.
//!
//! Node-local coordinates put the origin at the node's center with `y`
//! growing upward, matching the anchor convention of sprite scenes.

use bytemuck::{Pod, Zeroable};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// A point that lies outside every finite bounds.
    pub const INFINITY: Self = Self {
        x: f32::INFINITY,
        y: f32::INFINITY,
    };

    /// Convert to a glam Vec2.
    #[inline]
    pub fn to_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.x, self.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half of the width and height, the extents of a centered box.
    #[inline]
    pub fn half_extents(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle defined by its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rectangle centered at a point.
    #[inline]
    pub fn from_center(center: Point, size: Size) -> Self {
        let (half_w, half_h) = size.half_extents();
        Self {
            origin: Point {
                x: center.x - half_w,
                y: center.y - half_h,
            },
            size,
        }
    }

    /// Smallest x coordinate.
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    /// Smallest y coordinate.
    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    /// Largest x coordinate.
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Largest y coordinate.
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Check if a point lies strictly inside the rectangle.
    ///
    /// Points on an edge are outside, the same rule a sprite button uses for
    /// its touch bounds.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x > self.min_x()
            && point.x < self.max_x()
            && point.y > self.min_y()
            && point.y < self.max_y()
    }
}

/// An RGBA color with components in the 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    // Common colors
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::from_rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::from_rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::from_rgb(0.0, 0.0, 1.0);
    pub const GRAY: Self = Self::from_rgb(0.5, 0.5, 0.5);
}
